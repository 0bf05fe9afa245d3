//! Error types for session operations.

use super::status::Stage;

/// Errors caused by invalid requests against a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session not found: {session_id}")]
    NotFound { session_id: String },

    #[error("session is already processing")]
    AlreadyProcessing,

    #[error("cannot {action} while the session is {stage:?}")]
    InvalidStage { action: &'static str, stage: Stage },

    #[error("invalid question index {index} ({available} questions)")]
    InvalidQuestionIndex { index: usize, available: usize },

    #[error("question {index} has not been answered")]
    NotAnswered { index: usize },

    #[error("transcript text is empty")]
    EmptyTranscript,

    #[error("invalid image payload: {message}")]
    InvalidImage { message: String },

    #[error("project context has not been built yet")]
    ContextMissing,

    #[error("follow-up limit of {limit} reached")]
    FollowupLimitReached { limit: usize },
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
