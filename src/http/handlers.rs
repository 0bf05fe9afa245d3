use super::state::AppState;
use crate::models::Evaluation;
use crate::perception;
use crate::session::{SessionError, Stage};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub stage: Stage,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScreenRequest {
    /// Screenshot as base64 or a `data:image/...;base64,` URL
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptRequest {
    /// Speech-to-text segment from the browser
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CaptureResponse {
    pub success: bool,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub question_idx: usize,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub success: bool,
    pub is_last: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FollowupRequest {
    /// Index of the answered question to dig into
    pub question_idx: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FollowupResponse {
    pub question: String,
    pub question_idx: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub evaluation: Evaluation,
    pub interpretation: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let status = match self {
            SessionError::NotFound { .. } => StatusCode::NOT_FOUND,
            SessionError::AlreadyProcessing
            | SessionError::InvalidStage { .. }
            | SessionError::ContextMissing
            | SessionError::FollowupLimitReached { .. } => StatusCode::CONFLICT,
            SessionError::InvalidQuestionIndex { .. }
            | SessionError::NotAnswered { .. }
            | SessionError::EmptyTranscript
            | SessionError::InvalidImage { .. } => StatusCode::BAD_REQUEST,
        };
        error_response(status, self.to_string())
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /sessions
/// Create a new interview session
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session_id = state.sessions.create(state.session_config()).await;

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            stage: Stage::Idle,
        }),
    )
}

/// DELETE /sessions/:session_id
/// Destroy a session and everything captured for it
pub async fn destroy_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.sessions.destroy(&session_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /sessions/:session_id/capture/screen
/// Store a screenshot; OCR runs later, when processing starts
pub async fn capture_screen(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<ScreenRequest>,
) -> Response {
    let session = match state.sessions.get(&session_id).await {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };

    let Some(payload) = req.image else {
        return error_response(StatusCode::BAD_REQUEST, "missing image");
    };

    let image = match perception::decode_image_payload(&payload) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Rejected screenshot for session {}: {}", session_id, e);
            return SessionError::InvalidImage {
                message: e.to_string(),
            }
            .into_response();
        }
    };

    let result = session.lock().await.add_screen(image);
    match result {
        Ok(count) => (StatusCode::OK, Json(CaptureResponse { success: true, count })).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /sessions/:session_id/capture/transcript
/// Store a live speech transcript segment
pub async fn capture_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<TranscriptRequest>,
) -> Response {
    let session = match state.sessions.get(&session_id).await {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };

    let result = session
        .lock()
        .await
        .add_transcript(req.text.as_deref().unwrap_or_default());
    match result {
        Ok(count) => (StatusCode::OK, Json(CaptureResponse { success: true, count })).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /sessions/:session_id/process
/// Start OCR, project analysis and question generation in the background
pub async fn process(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    let session = match state.sessions.get(&session_id).await {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };

    let input = match session.lock().await.begin_processing() {
        Ok(input) => input,
        Err(e) => return e.into_response(),
    };

    info!(
        "Processing session {} ({} screens, {} transcript segments)",
        session_id,
        input.screens.len(),
        input.transcripts.len()
    );

    let status = session.lock().await.status();
    Arc::clone(&state.interviewer).spawn_processing(session, input);

    (StatusCode::ACCEPTED, Json(status)).into_response()
}

/// GET /sessions/:session_id/status
pub async fn get_status(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    match state.sessions.get(&session_id).await {
        Ok(session) => {
            let status = session.lock().await.status();
            (StatusCode::OK, Json(status)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// GET /sessions/:session_id/questions
pub async fn get_questions(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.sessions.get(&session_id).await {
        Ok(session) => {
            let questions = session.lock().await.questions().to_vec();
            (StatusCode::OK, Json(QuestionsResponse { questions })).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// POST /sessions/:session_id/answer
/// Record the student's answer to a question
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Response {
    let session = match state.sessions.get(&session_id).await {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };

    let result = session.lock().await.record_answer(req.question_idx, &req.answer);
    match result {
        Ok(is_last) => (StatusCode::OK, Json(AnswerResponse { success: true, is_last })).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /sessions/:session_id/followup
/// Generate a follow-up on an answered question and append it
pub async fn followup(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<FollowupRequest>,
) -> Response {
    let session = match state.sessions.get(&session_id).await {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };

    // Lock is released while the model is called
    let input = session.lock().await.followup_input(req.question_idx);
    let (answered, context) = match input {
        Ok(input) => input,
        Err(e) => return e.into_response(),
    };

    let question = state.interviewer.followup(&answered, &context).await;

    let pushed = session.lock().await.push_followup(question.clone());
    match pushed {
        Ok(question_idx) => (
            StatusCode::OK,
            Json(FollowupResponse {
                question,
                question_idx,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /sessions/:session_id/evaluate
/// Score the interview from the full answer history
pub async fn evaluate(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    let session = match state.sessions.get(&session_id).await {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };

    let input = session.lock().await.evaluation_input();
    let (context, history) = match input {
        Ok(input) => input,
        Err(e) => {
            error!("Cannot evaluate session {}: {}", session_id, e);
            return e.into_response();
        }
    };

    let evaluation = state.interviewer.evaluate(&context, &history).await;
    let interpretation = evaluation.interpretation().to_string();
    let completed = session.lock().await.complete(evaluation.clone());
    if let Err(e) = completed {
        return e.into_response();
    }

    (
        StatusCode::OK,
        Json(EvaluateResponse {
            evaluation,
            interpretation,
        }),
    )
        .into_response()
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
