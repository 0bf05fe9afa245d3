mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use base64::Engine;
use common::{interviewer, ScriptedProvider, EVALUATION_RESPONSE, QUESTIONS_RESPONSE, UNDERSTANDING_RESPONSE};
use project_interviewer::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(provider: ScriptedProvider, max_followups: usize) -> Router {
    let state = AppState::new(interviewer(Arc::new(provider)), max_followups);
    create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_session(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["stage"], "idle");
    body["session_id"].as_str().unwrap().to_string()
}

async fn wait_for_questions(app: &Router, id: &str) -> Value {
    for _ in 0..200 {
        let (status, body) = send(app, Method::GET, &format!("/sessions/{}/status", id), None).await;
        assert_eq!(status, StatusCode::OK);
        if body["stage"] == "questions_ready" && body["processing"] == false {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("session {} never reached questions_ready", id);
}

#[tokio::test]
async fn test_health_check() {
    let app = app(ScriptedProvider::new(), 2);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_full_interview_flow() {
    let provider = ScriptedProvider::new()
        .respond(UNDERSTANDING_RESPONSE)
        .respond(QUESTIONS_RESPONSE)
        .respond("FOLLOWUP: How are conflicting edits detected?")
        .respond(EVALUATION_RESPONSE);
    let app = app(provider, 2);
    let id = create_session(&app).await;

    // Capture
    let image = base64::engine::general_purpose::STANDARD.encode("fn main() { start_server(); }");
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/capture/screen", id),
        Some(json!({ "image": format!("data:image/png;base64,{}", image) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "count": 1 }));

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/capture/transcript", id),
        Some(json!({ "text": "This is my task tracker" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    // Processing
    let (status, body) = send(&app, Method::POST, &format!("/sessions/{}/process", id), None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["processing"], true);

    let status_body = wait_for_questions(&app, &id).await;
    assert_eq!(status_body["screen_captures"], 1);
    assert_eq!(status_body["transcript_segments"], 1);
    assert_eq!(status_body["questions_count"], 3);

    let (status, body) = send(&app, Method::GET, &format!("/sessions/{}/questions", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["questions"][0],
        "How does the sync engine resolve conflicting edits?"
    );

    // Interview
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/answer", id),
        Some(json!({ "question_idx": 0, "answer": "Last write wins per field." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "is_last": false }));

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/followup", id),
        Some(json!({ "question_idx": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], "How are conflicting edits detected?");
    assert_eq!(body["question_idx"], 3);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/answer", id),
        Some(json!({ "question_idx": 3, "answer": "Each field carries a version." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_last"], true);

    // Evaluation
    let (status, body) = send(&app, Method::POST, &format!("/sessions/{}/evaluate", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["evaluation"]["final_score"], 6.9);
    assert_eq!(body["evaluation"]["feedback"], "Good job.");
    assert!(body["interpretation"]
        .as_str()
        .unwrap()
        .starts_with("Satisfactory"));

    let (_, body) = send(&app, Method::GET, &format!("/sessions/{}/status", id), None).await;
    assert_eq!(body["stage"], "evaluated");
    assert_eq!(body["answers_count"], 2);

    // Evaluated is terminal
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/answer", id),
        Some(json!({ "question_idx": 0, "answer": "late answer" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "cannot answer while the session is Evaluated");

    let (status, _) = send(&app, Method::POST, &format!("/sessions/{}/evaluate", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = send(&app, Method::POST, &format!("/sessions/{}/process", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Teardown
    let (status, _) = send(&app, Method::DELETE, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &format!("/sessions/{}/status", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_session() {
    let app = app(ScriptedProvider::new(), 2);

    let (status, body) = send(&app, Method::GET, "/sessions/nope/status", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session not found: nope");

    let (status, _) = send(&app, Method::DELETE, "/sessions/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_captures_are_rejected() {
    let app = app(ScriptedProvider::new(), 2);
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/capture/screen", id),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing image");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/capture/screen", id),
        Some(json!({ "image": "%%%" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/capture/transcript", id),
        Some(json!({ "text": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "transcript text is empty");

    let (_, body) = send(&app, Method::GET, &format!("/sessions/{}/status", id), None).await;
    assert_eq!(body["screen_captures"], 0);
    assert_eq!(body["transcript_segments"], 0);
    assert_eq!(body["ready"], false);
}

#[tokio::test]
async fn test_interview_requests_before_processing() {
    let app = app(ScriptedProvider::new(), 2);
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/answer", id),
        Some(json!({ "question_idx": 0, "answer": "early" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid question index 0 (0 questions)");

    let (status, _) = send(&app, Method::POST, &format!("/sessions/{}/evaluate", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_followup_limit() {
    let app = app(ScriptedProvider::new(), 0);
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/followup", id),
        Some(json!({ "question_idx": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "follow-up limit of 0 reached");
}
