use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::info;

use super::config::SessionConfig;
use super::error::{SessionError, SessionResult};
use super::session::InterviewSession;

pub type SharedSession = Arc<Mutex<InterviewSession>>;

/// Live interview sessions (session_id → session)
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, SharedSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session; returns its id
    pub async fn create(&self, config: SessionConfig) -> String {
        let session_id = config.session_id.clone();
        let session = Arc::new(Mutex::new(InterviewSession::new(config)));

        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), session);

        session_id
    }

    pub async fn get(&self, session_id: &str) -> SessionResult<SharedSession> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound {
                session_id: session_id.to_string(),
            })
    }

    /// Drop a session and everything it captured
    pub async fn destroy(&self, session_id: &str) -> SessionResult<()> {
        let removed = {
            let mut sessions = self.sessions.write().await;
            sessions.remove(session_id)
        };

        match removed {
            Some(_) => {
                info!("Destroyed session: {}", session_id);
                Ok(())
            }
            None => Err(SessionError::NotFound {
                session_id: session_id.to_string(),
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
