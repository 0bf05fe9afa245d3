use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a session is in the interview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Capturing screens and transcript
    Idle,
    /// Project analyzed, questions not generated yet
    ContextBuilt,
    /// Questions generated, none answered yet
    QuestionsReady,
    /// At least one answer recorded
    InterviewInProgress,
    /// Scored; terminal
    Evaluated,
}

/// Snapshot of a session for status queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatus {
    pub session_id: String,

    pub stage: Stage,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// Number of screenshots captured so far
    pub screen_captures: usize,

    /// Number of transcript segments received
    pub transcript_segments: usize,

    /// Whether OCR/analysis is running in the background
    pub processing: bool,

    /// Enough material captured to start processing
    pub ready: bool,

    pub questions_count: usize,

    pub answers_count: usize,

    /// Last processing failure, if any
    pub error: Option<String>,
}
