use std::sync::Arc;

use tracing::{error, info};

use crate::llm::{CompletionProvider, GenerationOptions};
use crate::models::{Evaluation, ProjectContext, QAPair};
use crate::parser;
use crate::prompts;

const MAX_TOKENS: u32 = 700;

/// Scores a finished interview
pub struct EvaluationAgent {
    provider: Arc<dyn CompletionProvider>,
    temperature: f32,
}

impl EvaluationAgent {
    pub fn new(provider: Arc<dyn CompletionProvider>, temperature: f32) -> Self {
        Self {
            provider,
            temperature,
        }
    }

    /// Evaluate the full, ordered Q&A history. On failure a neutral
    /// evaluation carrying the error text is returned.
    pub async fn evaluate(&self, context: &ProjectContext, history: &[QAPair]) -> Evaluation {
        info!("Evaluating interview performance ({} answers)...", history.len());

        let prompt = prompts::evaluation_prompt(context, history);
        let options = GenerationOptions {
            temperature: self.temperature,
            max_tokens: MAX_TOKENS,
        };

        match self.provider.complete(&prompt, options).await {
            Ok(response) => {
                let evaluation = parser::parse_evaluation(&response);
                info!("Evaluation complete (final score {:.2})", evaluation.final_score);
                evaluation
            }
            Err(e) => {
                error!("Evaluation failed ({}): {}", self.provider.name(), e);
                Evaluation::neutral(e.to_string())
            }
        }
    }
}
