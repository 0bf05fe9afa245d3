//! Remote inference over an OpenAI-compatible chat-completions API
//!
//! - `LlmClient`: HTTP client with bounded retry while the model loads (503)
//! - `CompletionProvider`: the seam the agents call through
//! - `messages`: request/response bodies

mod client;
mod error;
pub mod messages;
mod provider;

pub use client::LlmClient;
pub use error::{LlmError, LlmResult};
pub use messages::{ChatMessage, ChatRequest, ChatResponse};
pub use provider::{CompletionProvider, GenerationOptions};
