use std::sync::Arc;

use tracing::{error, info};

use crate::llm::{CompletionProvider, GenerationOptions};
use crate::models::{PerceptionData, ProjectContext};
use crate::parser;
use crate::prompts;

const MAX_TOKENS: u32 = 600;

/// Builds a [`ProjectContext`] from what was seen and heard
pub struct UnderstandingAgent {
    provider: Arc<dyn CompletionProvider>,
    temperature: f32,
}

impl UnderstandingAgent {
    pub fn new(provider: Arc<dyn CompletionProvider>, temperature: f32) -> Self {
        Self {
            provider,
            temperature,
        }
    }

    /// Analyze the presentation. Never fails: on any error the
    /// [`ProjectContext::unavailable`] placeholder is returned.
    pub async fn understand(&self, perception: &PerceptionData) -> ProjectContext {
        info!("Analyzing project context...");

        let prompt = prompts::understanding_prompt(perception);
        let options = GenerationOptions {
            temperature: self.temperature,
            max_tokens: MAX_TOKENS,
        };

        match self.provider.complete(&prompt, options).await {
            Ok(response) => {
                let context = parser::parse_project_context(&response);
                info!("Project context analyzed");
                context
            }
            Err(e) => {
                error!("Understanding failed ({}): {}", self.provider.name(), e);
                ProjectContext::unavailable(e.to_string())
            }
        }
    }
}
