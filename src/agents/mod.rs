//! Interview agents
//!
//! Each agent renders a prompt, calls the completion provider and decodes
//! the response. Agents are fail-soft: provider and parsing errors are
//! logged and replaced by a deterministic default, never returned.

mod evaluation;
mod interview;
mod understanding;

pub use evaluation::EvaluationAgent;
pub use interview::{InterviewAgent, DEFAULT_FOLLOWUP, DEFAULT_QUESTIONS};
pub use understanding::UnderstandingAgent;
