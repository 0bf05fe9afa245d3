use serde::{Deserialize, Serialize};

/// Configuration for an interview session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "session-5f0c...")
    pub session_id: String,

    /// How many follow-up questions may be added on top of the initial ones
    /// Default: 2
    pub max_followups: usize,
}

impl SessionConfig {
    pub fn with_max_followups(max_followups: usize) -> Self {
        Self {
            max_followups,
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            max_followups: 2,
        }
    }
}
