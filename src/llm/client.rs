use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::error::{LlmError, LlmResult};
use super::messages::{ChatMessage, ChatRequest, ChatResponse};
use super::provider::{CompletionProvider, GenerationOptions};
use crate::config::LlmConfig;

/// Longest wait between two attempts
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Client for an OpenAI-compatible chat-completions endpoint
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Create a new client from configuration
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        if config.api_key.is_empty() {
            warn!("No LLM API key configured; requests will likely be rejected");
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(|e| {
            LlmError::Config {
                message: format!("invalid API key: {}", e),
            }
        })?;
        default_headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| LlmError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        info!("LLM client ready (model={}, url={})", config.model, config.api_url);

        Ok(Self { client, config })
    }

    /// Generate a completion for a single user prompt.
    ///
    /// A 503 (model still loading) is retried up to `max_retries` times,
    /// waiting `retry_delay_ms` before the first retry and doubling after.
    /// Every other failure is returned immediately.
    pub async fn generate(&self, prompt: &str, options: GenerationOptions) -> LlmResult<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let max_retries = self.config.max_retries;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            match self.generate_once(&request).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt <= max_retries => {
                    let delay = self.retry_delay(attempt);
                    warn!(
                        retry = attempt,
                        max_retries = max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Model is loading, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(LlmError::ServiceUnavailable { .. }) => {
                    return Err(LlmError::ServiceUnavailable { attempts: attempt })
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn retry_delay(&self, attempt: u32) -> Duration {
        let base = Duration::from_millis(self.config.retry_delay_ms);
        base.saturating_mul(1 << (attempt - 1).min(16)).min(MAX_RETRY_DELAY)
    }

    /// Make a single request without retry
    async fn generate_once(&self, request: &ChatRequest) -> LlmResult<String> {
        debug!(url = %self.config.api_url, max_tokens = request.max_tokens, "sending completion request");

        let response = self
            .client
            .post(&self.config.api_url)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        match status {
            s if s.is_success() => Self::extract_content(&body),
            StatusCode::SERVICE_UNAVAILABLE => Err(LlmError::ServiceUnavailable { attempts: 1 }),
            s => Err(LlmError::Api {
                status: s.as_u16(),
                body,
            }),
        }
    }

    /// First choice's message, or the raw body when there are no choices
    fn extract_content(body: &str) -> LlmResult<String> {
        let parsed: ChatResponse =
            serde_json::from_str(body).map_err(|e| LlmError::InvalidResponse {
                message: e.to_string(),
            })?;

        match parsed.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content.trim().to_string()),
            None => Ok(body.trim().to_string()),
        }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(&self, prompt: &str, options: GenerationOptions) -> LlmResult<String> {
        self.generate(prompt, options).await
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}
