use crate::pipeline::Interviewer;
use crate::session::{SessionConfig, SessionRegistry};
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Live interview sessions
    pub sessions: SessionRegistry,

    /// Pipeline shared by all sessions
    pub interviewer: Arc<Interviewer>,

    /// Follow-up questions allowed per session
    pub max_followups: usize,
}

impl AppState {
    pub fn new(interviewer: Interviewer, max_followups: usize) -> Self {
        Self {
            sessions: SessionRegistry::new(),
            interviewer: Arc::new(interviewer),
            max_followups,
        }
    }

    /// Config for the next session created through the API
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::with_max_followups(self.max_followups)
    }
}
