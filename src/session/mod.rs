//! Interview session management
//!
//! This module provides the `InterviewSession` state object that tracks:
//! - Captured screenshots and transcript segments
//! - The analyzed project context and interview questions
//! - Answers in interview order and the final evaluation
//! - Stage transitions: idle → context built → questions ready →
//!   interview in progress → evaluated

mod config;
mod error;
mod registry;
mod session;
mod status;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use registry::{SessionRegistry, SharedSession};
pub use session::{CapturedInput, InterviewSession};
pub use status::{SessionStatus, Stage};
