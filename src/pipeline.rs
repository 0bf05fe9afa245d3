//! End-to-end interview pipeline
//!
//! Screens → OCR → understanding → initial questions, then follow-ups and
//! the final evaluation on demand. Every step is fail-soft, so a degraded
//! session still reaches the interview.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::agents::{EvaluationAgent, InterviewAgent, UnderstandingAgent};
use crate::config::{Config, InterviewConfig};
use crate::llm::{CompletionProvider, LlmClient};
use crate::models::{Evaluation, PerceptionData, ProjectContext, QAPair};
use crate::perception::{self, OcrEngine, TesseractOcr};
use crate::session::{CapturedInput, SharedSession};

pub struct Interviewer {
    ocr: Arc<dyn OcrEngine>,
    understanding: UnderstandingAgent,
    interview: InterviewAgent,
    evaluation: EvaluationAgent,
}

impl Interviewer {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        ocr: Arc<dyn OcrEngine>,
        temperature: f32,
        interview: &InterviewConfig,
    ) -> Self {
        Self {
            ocr,
            understanding: UnderstandingAgent::new(Arc::clone(&provider), temperature),
            interview: InterviewAgent::new(
                Arc::clone(&provider),
                temperature,
                interview.num_initial_questions,
            ),
            evaluation: EvaluationAgent::new(provider, temperature),
        }
    }

    /// Remote LLM client plus tesseract OCR, as configured
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = LlmClient::new(config.llm.clone()).context("Failed to create LLM client")?;
        let ocr = TesseractOcr::new(&config.ocr);

        Ok(Self::new(
            Arc::new(client),
            Arc::new(ocr),
            config.llm.temperature,
            &config.interview,
        ))
    }

    /// OCR the captured screens and merge them with the transcript
    pub async fn perceive(&self, input: &CapturedInput) -> PerceptionData {
        info!("Processing {} screens...", input.screens.len());
        let screen_text = perception::screen_text_from_images(self.ocr.as_ref(), &input.screens).await;
        info!("Audio transcripts: {} segments received", input.transcripts.len());

        perception::assemble(screen_text, &input.transcripts)
    }

    /// Run perception, understanding and question generation, writing the
    /// results into the session as each stage completes
    pub async fn process(&self, session: SharedSession, input: CapturedInput) {
        let perception = self.perceive(&input).await;

        let context = self.understanding.understand(&perception).await;
        session.lock().await.set_context(context.clone());

        let questions = self.interview.generate_initial_questions(&context).await;
        session.lock().await.set_questions(questions);

        info!("Processing done");
    }

    /// Run [`Self::process`] in the background. A panic in the pipeline is
    /// recorded on the session instead of leaving it stuck in processing.
    pub fn spawn_processing(
        self: Arc<Self>,
        session: SharedSession,
        input: CapturedInput,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let worker = {
                let session = Arc::clone(&session);
                tokio::spawn(async move { self.process(session, input).await })
            };

            if let Err(e) = worker.await {
                error!("Processing task panicked: {}", e);
                session
                    .lock()
                    .await
                    .fail_processing(format!("processing task failed: {}", e));
            }
        })
    }

    pub async fn followup(&self, answered: &QAPair, context: &ProjectContext) -> String {
        self.interview
            .generate_followup(&answered.question, &answered.answer, context)
            .await
    }

    pub async fn evaluate(&self, context: &ProjectContext, history: &[QAPair]) -> Evaluation {
        self.evaluation.evaluate(context, history).await
    }
}
