use super::error::LlmResult;

/// Sampling parameters for a single completion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Text completion backend used by the interview agents
///
/// Implemented by [`super::LlmClient`] for the remote API; tests plug in
/// canned responses.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete a single user prompt
    async fn complete(&self, prompt: &str, options: GenerationOptions) -> LlmResult<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
