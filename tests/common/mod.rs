// Shared test doubles for the completion provider and OCR engine.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use project_interviewer::config::InterviewConfig;
use project_interviewer::llm::{CompletionProvider, GenerationOptions, LlmError, LlmResult};
use project_interviewer::{Interviewer, OcrEngine};

/// Replays canned responses in order and records every prompt it receives
#[derive(Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<LlmResult<String>>>,
    calls: Mutex<Vec<(String, GenerationOptions)>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, text: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, error: LlmError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<(String, GenerationOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, prompt: &str, options: GenerationOptions) -> LlmResult<String> {
        self.calls.lock().unwrap().push((prompt.to_string(), options));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::Network {
                    message: "no scripted response left".to_string(),
                })
            })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn api_error(status: u16, body: &str) -> LlmError {
    LlmError::Api {
        status,
        body: body.to_string(),
    }
}

/// "Recognizes" an image by reading its bytes as UTF-8; `FAIL` fails
pub struct EchoOcr;

#[async_trait::async_trait]
impl OcrEngine for EchoOcr {
    async fn recognize(&self, image: &[u8]) -> Result<String> {
        let text = String::from_utf8_lossy(image).to_string();
        if text == "FAIL" {
            bail!("unreadable image");
        }
        Ok(text)
    }

    fn name(&self) -> &str {
        "echo"
    }
}

pub fn interviewer(provider: Arc<ScriptedProvider>) -> Interviewer {
    Interviewer::new(provider, Arc::new(EchoOcr), 0.7, &InterviewConfig::default())
}

pub const UNDERSTANDING_RESPONSE: &str = "SUMMARY: A collaborative task tracker with offline sync.
TECH_STACK: Rust, Axum, SQLite
COMPLEXITY: Intermediate
FEATURES: - offline sync
- shared boards";

pub const QUESTIONS_RESPONSE: &str = "Q1: How does the sync engine resolve conflicting edits?
Q2: Why did you choose SQLite instead of a server database?
Q3: How would you scale the API to many concurrent users?";

pub const EVALUATION_RESPONSE: &str =
    "CLARITY: 8\nTECHNICAL_DEPTH: 6\nCOMPLETENESS: 7\nFEEDBACK: Good job.";
