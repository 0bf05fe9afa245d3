use std::sync::Arc;

use tracing::{error, info, warn};

use crate::llm::{CompletionProvider, GenerationOptions};
use crate::models::ProjectContext;
use crate::parser;
use crate::prompts;

const QUESTIONS_MAX_TOKENS: u32 = 400;
const FOLLOWUP_MAX_TOKENS: u32 = 200;

/// Asked when question generation fails outright
pub const DEFAULT_QUESTIONS: [&str; 3] = [
    "Can you explain the main purpose of your project?",
    "What technologies did you use and why?",
    "What challenges did you face during development?",
];

/// Asked when no follow-up could be generated
pub const DEFAULT_FOLLOWUP: &str = "Can you elaborate more on that?";

/// Generates the interview questions for a project
pub struct InterviewAgent {
    provider: Arc<dyn CompletionProvider>,
    temperature: f32,
    num_questions: usize,
}

impl InterviewAgent {
    pub fn new(provider: Arc<dyn CompletionProvider>, temperature: f32, num_questions: usize) -> Self {
        Self {
            provider,
            temperature,
            num_questions,
        }
    }

    /// Opening questions, at most `num_questions` of them.
    ///
    /// Falls back to [`DEFAULT_QUESTIONS`] when the call fails or nothing
    /// question-like can be extracted from the response.
    pub async fn generate_initial_questions(&self, context: &ProjectContext) -> Vec<String> {
        info!("Generating {} initial interview questions...", self.num_questions);

        let prompt = prompts::interview_prompt(context, &[]);
        let options = GenerationOptions {
            temperature: self.temperature,
            max_tokens: QUESTIONS_MAX_TOKENS,
        };

        let mut questions = match self.provider.complete(&prompt, options).await {
            Ok(response) => parser::parse_questions(&response, self.num_questions),
            Err(e) => {
                error!("Question generation failed ({}): {}", self.provider.name(), e);
                return self.default_questions();
            }
        };

        if questions.is_empty() {
            warn!("No questions found in model response, using defaults");
            return self.default_questions();
        }

        questions.truncate(self.num_questions);
        info!("Generated {} questions", questions.len());
        questions
    }

    /// One question digging into the student's last answer.
    /// Falls back to [`DEFAULT_FOLLOWUP`].
    pub async fn generate_followup(
        &self,
        question: &str,
        answer: &str,
        context: &ProjectContext,
    ) -> String {
        info!("Generating follow-up question...");

        let prompt = prompts::followup_prompt(question, answer, context);
        let options = GenerationOptions {
            temperature: self.temperature,
            max_tokens: FOLLOWUP_MAX_TOKENS,
        };

        match self.provider.complete(&prompt, options).await {
            Ok(response) => {
                let followup = parser::parse_followup(&response);
                if followup.is_empty() {
                    warn!("Empty follow-up response, using default");
                    DEFAULT_FOLLOWUP.to_string()
                } else {
                    followup
                }
            }
            Err(e) => {
                error!("Follow-up generation failed ({}): {}", self.provider.name(), e);
                DEFAULT_FOLLOWUP.to_string()
            }
        }
    }

    fn default_questions(&self) -> Vec<String> {
        DEFAULT_QUESTIONS
            .iter()
            .take(self.num_questions)
            .map(|q| q.to_string())
            .collect()
    }
}
