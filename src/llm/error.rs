//! Error types for the LLM client.

/// LLM client errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Transport failure (connect, timeout, body read).
    #[error("network error: {message}")]
    Network { message: String },

    /// Non-success status other than 503.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// Model still unavailable (503) after all retries.
    #[error("service unavailable after {attempts} attempts")]
    ServiceUnavailable { attempts: u32 },

    /// 2xx response whose body could not be decoded.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Client could not be built from configuration.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl LlmError {
    /// Whether the error warrants another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable { .. })
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for LLM operations.
pub type LlmResult<T> = Result<T, LlmError>;
