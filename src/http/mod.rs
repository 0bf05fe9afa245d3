//! HTTP API driving interview sessions
//!
//! - POST /sessions - Create a session
//! - DELETE /sessions/:id - Destroy a session
//! - POST /sessions/:id/capture/screen - Add a screenshot (base64)
//! - POST /sessions/:id/capture/transcript - Add a transcript segment
//! - POST /sessions/:id/process - Start OCR + analysis in the background
//! - GET /sessions/:id/status - Query session status
//! - GET /sessions/:id/questions - Interview questions
//! - POST /sessions/:id/answer - Answer a question
//! - POST /sessions/:id/followup - Ask a follow-up on an answered question
//! - POST /sessions/:id/evaluate - Score the interview
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{
    AnswerRequest, AnswerResponse, CaptureResponse, CreateSessionResponse, ErrorResponse,
    EvaluateResponse, FollowupRequest, FollowupResponse, QuestionsResponse, ScreenRequest,
    TranscriptRequest,
};
pub use routes::create_router;
pub use state::AppState;
