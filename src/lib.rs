pub mod agents;
pub mod config;
pub mod http;
pub mod llm;
pub mod models;
pub mod parser;
pub mod perception;
pub mod pipeline;
pub mod prompts;
pub mod scoring;
pub mod session;

pub use agents::{EvaluationAgent, InterviewAgent, UnderstandingAgent};
pub use config::Config;
pub use http::{create_router, AppState};
pub use llm::{CompletionProvider, GenerationOptions, LlmClient, LlmError};
pub use models::{Evaluation, PerceptionData, ProjectContext, QAPair};
pub use perception::{OcrEngine, TesseractOcr};
pub use pipeline::Interviewer;
pub use session::{InterviewSession, SessionConfig, SessionError, SessionRegistry, SessionStatus, Stage};
