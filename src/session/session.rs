use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::config::SessionConfig;
use super::error::{SessionError, SessionResult};
use super::status::{SessionStatus, Stage};
use crate::models::{Evaluation, ProjectContext, QAPair};

/// Captures needed before processing is worth starting
const READY_THRESHOLD: usize = 2;

/// Material handed to the background pipeline when processing starts
#[derive(Debug, Clone)]
pub struct CapturedInput {
    pub screens: Vec<Vec<u8>>,
    pub transcripts: Vec<String>,
}

/// State of one student's interview, from capture to evaluation.
///
/// Lifecycle: created by the registry, mutated as the interview advances,
/// destroyed explicitly through the registry.
#[derive(Debug)]
pub struct InterviewSession {
    config: SessionConfig,
    created_at: DateTime<Utc>,
    stage: Stage,

    /// Whether the background pipeline is running
    processing: bool,

    /// Last pipeline failure
    error: Option<String>,

    /// Decoded screenshots, in capture order
    screens: Vec<Vec<u8>>,

    /// Speech transcript segments, in capture order
    transcripts: Vec<String>,

    context: Option<ProjectContext>,

    questions: Vec<String>,

    /// Answers in the order they were given
    answers: Vec<QAPair>,

    followups_asked: usize,

    evaluation: Option<Evaluation>,
}

impl InterviewSession {
    pub fn new(config: SessionConfig) -> Self {
        info!("Creating interview session: {}", config.session_id);

        Self {
            config,
            created_at: Utc::now(),
            stage: Stage::Idle,
            processing: false,
            error: None,
            screens: Vec::new(),
            transcripts: Vec::new(),
            context: None,
            questions: Vec::new(),
            answers: Vec::new(),
            followups_asked: 0,
            evaluation: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.config.session_id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Store a decoded screenshot; returns the number captured so far
    pub fn add_screen(&mut self, image: Vec<u8>) -> SessionResult<usize> {
        if image.is_empty() {
            return Err(SessionError::InvalidImage {
                message: "image is empty".to_string(),
            });
        }
        self.screens.push(image);
        Ok(self.screens.len())
    }

    /// Store a transcript segment; returns the number received so far
    pub fn add_transcript(&mut self, text: &str) -> SessionResult<usize> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyTranscript);
        }
        self.transcripts.push(text.to_string());
        Ok(self.transcripts.len())
    }

    /// Mark the session as processing and hand out what was captured.
    ///
    /// Allowed from `Idle`, or again after a failed run; a restart drops
    /// whatever the failed run produced.
    pub fn begin_processing(&mut self) -> SessionResult<CapturedInput> {
        if self.processing {
            return Err(SessionError::AlreadyProcessing);
        }
        if self.stage != Stage::Idle && self.error.is_none() {
            return Err(self.invalid_stage("start processing"));
        }

        self.stage = Stage::Idle;
        self.context = None;
        self.questions.clear();
        self.answers.clear();
        self.followups_asked = 0;
        self.evaluation = None;

        self.processing = true;
        self.error = None;

        Ok(CapturedInput {
            screens: self.screens.clone(),
            transcripts: self.transcripts.clone(),
        })
    }

    pub fn set_context(&mut self, context: ProjectContext) {
        self.context = Some(context);
        self.stage = Stage::ContextBuilt;
    }

    /// Install the initial questions; ends processing
    pub fn set_questions(&mut self, questions: Vec<String>) {
        self.questions = questions;
        self.stage = Stage::QuestionsReady;
        self.processing = false;
    }

    pub fn fail_processing(&mut self, error: impl Into<String>) {
        let error = error.into();
        warn!("Processing failed for session {}: {}", self.id(), error);
        self.error = Some(error);
        self.processing = false;
    }

    pub fn context(&self) -> Option<&ProjectContext> {
        self.context.as_ref()
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &[QAPair] {
        &self.answers
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// Record the answer to question `index`; returns whether it was the
    /// last question
    pub fn record_answer(&mut self, index: usize, answer: &str) -> SessionResult<bool> {
        self.ensure_open("answer")?;
        let question = self.question(index)?.to_string();

        self.answers.push(QAPair::new(question, answer.trim()));
        self.stage = Stage::InterviewInProgress;

        Ok(index + 1 >= self.questions.len())
    }

    /// Question, latest answer and context needed to ask a follow-up on
    /// question `index`
    pub fn followup_input(&self, index: usize) -> SessionResult<(QAPair, ProjectContext)> {
        self.ensure_open("ask a follow-up")?;
        self.ensure_followup_allowed()?;
        let question = self.question(index)?;
        let context = self.context.clone().ok_or(SessionError::ContextMissing)?;

        let answered = self
            .answers
            .iter()
            .rev()
            .find(|qa| qa.question == question)
            .cloned()
            .ok_or(SessionError::NotAnswered { index })?;

        Ok((answered, context))
    }

    /// Append a follow-up question; returns its index
    pub fn push_followup(&mut self, question: String) -> SessionResult<usize> {
        self.ensure_open("ask a follow-up")?;
        self.ensure_followup_allowed()?;

        self.followups_asked += 1;
        self.questions.push(question);
        Ok(self.questions.len() - 1)
    }

    /// Context and the finalized answer history for scoring
    pub fn evaluation_input(&self) -> SessionResult<(ProjectContext, Vec<QAPair>)> {
        self.ensure_open("evaluate")?;
        let context = self.context.clone().ok_or(SessionError::ContextMissing)?;
        Ok((context, self.answers.clone()))
    }

    /// Store the final evaluation; `Evaluated` is terminal
    pub fn complete(&mut self, evaluation: Evaluation) -> SessionResult<()> {
        self.ensure_open("evaluate")?;
        info!(
            "Session {} evaluated (final score {:.2})",
            self.id(),
            evaluation.final_score
        );
        self.evaluation = Some(evaluation);
        self.stage = Stage::Evaluated;
        Ok(())
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            session_id: self.config.session_id.clone(),
            stage: self.stage,
            created_at: self.created_at,
            screen_captures: self.screens.len(),
            transcript_segments: self.transcripts.len(),
            processing: self.processing,
            ready: self.screens.len() >= READY_THRESHOLD
                || self.transcripts.len() >= READY_THRESHOLD,
            questions_count: self.questions.len(),
            answers_count: self.answers.len(),
            error: self.error.clone(),
        }
    }

    fn ensure_open(&self, action: &'static str) -> SessionResult<()> {
        if self.stage == Stage::Evaluated {
            return Err(self.invalid_stage(action));
        }
        Ok(())
    }

    fn invalid_stage(&self, action: &'static str) -> SessionError {
        SessionError::InvalidStage {
            action,
            stage: self.stage,
        }
    }

    fn ensure_followup_allowed(&self) -> SessionResult<()> {
        if self.followups_asked >= self.config.max_followups {
            return Err(SessionError::FollowupLimitReached {
                limit: self.config.max_followups,
            });
        }
        Ok(())
    }

    fn question(&self, index: usize) -> SessionResult<&str> {
        self.questions
            .get(index)
            .map(String::as_str)
            .ok_or(SessionError::InvalidQuestionIndex {
                index,
                available: self.questions.len(),
            })
    }
}
