//! Integration tests for LlmClient.
//!
//! Uses wiremock for the chat-completions endpoint. Covers request shape,
//! content extraction, status mapping and the 503 retry loop.

use project_interviewer::config::LlmConfig;
use project_interviewer::llm::{GenerationOptions, LlmClient, LlmError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(mock_server: &MockServer) -> LlmConfig {
    LlmConfig {
        api_url: format!("{}/v1/chat/completions", mock_server.uri()),
        api_key: "test-key".to_string(),
        model: "test-model".to_string(),
        timeout_secs: 5,
        max_retries: 1,
        retry_delay_ms: 10,
        ..LlmConfig::default()
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

fn options(max_tokens: u32) -> GenerationOptions {
    GenerationOptions {
        temperature: 0.7,
        max_tokens,
    }
}

#[tokio::test]
async fn test_generate_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "max_tokens": 400,
            "messages": [{ "role": "user", "content": "Ask me something" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("  Q1: Why Rust?  ")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LlmClient::new(test_config(&mock_server)).expect("failed to create client");
    let text = client
        .generate("Ask me something", options(400))
        .await
        .expect("generate failed");

    assert_eq!(text, "Q1: Why Rust?");
}

#[tokio::test]
async fn test_generate_retries_once_on_503() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ready now")))
        .mount(&mock_server)
        .await;

    let client = LlmClient::new(test_config(&mock_server)).expect("failed to create client");
    let text = client
        .generate("prompt", options(200))
        .await
        .expect("generate failed");

    assert_eq!(text, "ready now");
    let requests = mock_server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_generate_gives_up_after_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = LlmClient::new(test_config(&mock_server)).expect("failed to create client");
    let err = client
        .generate("prompt", options(200))
        .await
        .expect_err("503 should fail");

    assert!(
        matches!(err, LlmError::ServiceUnavailable { attempts: 2 }),
        "unexpected error: {:?}",
        err
    );
}

#[tokio::test]
async fn test_generate_without_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = LlmConfig {
        max_retries: 0,
        ..test_config(&mock_server)
    };
    let client = LlmClient::new(config).expect("failed to create client");
    let err = client.generate("prompt", options(200)).await.unwrap_err();

    assert!(matches!(err, LlmError::ServiceUnavailable { attempts: 1 }));
}

#[tokio::test]
async fn test_generate_other_errors_are_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LlmClient::new(test_config(&mock_server)).expect("failed to create client");
    let err = client.generate("prompt", options(200)).await.unwrap_err();

    match &err {
        LlmError::Api { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "internal failure");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert_eq!(err.to_string(), "API error: 500 - internal failure");
}

#[tokio::test]
async fn test_generate_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LlmClient::new(test_config(&mock_server)).expect("failed to create client");
    let err = client.generate("prompt", options(200)).await.unwrap_err();

    assert!(matches!(err, LlmError::Api { status: 401, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_generate_without_choices_returns_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"choices\": []}"))
        .mount(&mock_server)
        .await;

    let client = LlmClient::new(test_config(&mock_server)).expect("failed to create client");
    let text = client.generate("prompt", options(200)).await.unwrap();

    assert_eq!(text, "{\"choices\": []}");
}

#[tokio::test]
async fn test_generate_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = LlmClient::new(test_config(&mock_server)).expect("failed to create client");
    let err = client.generate("prompt", options(200)).await.unwrap_err();

    assert!(matches!(err, LlmError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_generate_network_error() {
    let config = LlmConfig {
        api_url: "http://127.0.0.1:1/v1/chat/completions".to_string(),
        timeout_secs: 2,
        retry_delay_ms: 10,
        ..LlmConfig::default()
    };

    let client = LlmClient::new(config).expect("failed to create client");
    let err = client.generate("prompt", options(200)).await.unwrap_err();

    assert!(matches!(err, LlmError::Network { .. }), "unexpected error: {:?}", err);
}

#[test]
fn test_invalid_api_key_is_rejected() {
    let config = LlmConfig {
        api_key: "bad\nkey".to_string(),
        ..LlmConfig::default()
    };

    let err = LlmClient::new(config).unwrap_err();
    assert!(matches!(err, LlmError::Config { .. }));
}
