use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/:session_id", delete(handlers::destroy_session))
        // Capture
        .route(
            "/sessions/:session_id/capture/screen",
            post(handlers::capture_screen),
        )
        .route(
            "/sessions/:session_id/capture/transcript",
            post(handlers::capture_transcript),
        )
        // Processing
        .route("/sessions/:session_id/process", post(handlers::process))
        .route("/sessions/:session_id/status", get(handlers::get_status))
        // Interview
        .route(
            "/sessions/:session_id/questions",
            get(handlers::get_questions),
        )
        .route("/sessions/:session_id/answer", post(handlers::submit_answer))
        .route("/sessions/:session_id/followup", post(handlers::followup))
        .route("/sessions/:session_id/evaluate", post(handlers::evaluate))
        // Browser capture page runs on another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
