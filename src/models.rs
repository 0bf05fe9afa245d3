use serde::{Deserialize, Serialize};

use crate::scoring;

/// Text gathered while the student presents: OCR output of the captured
/// screens plus the live speech transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerceptionData {
    pub screen_text: String,
    pub audio_transcript: String,
}

/// What the model understood about the presented project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub summary: String,
    pub tech_stack: String,
    pub complexity: String,
    pub features: String,

    /// Unparsed model output (or the error text when analysis failed)
    pub raw_response: String,
}

impl ProjectContext {
    /// Placeholder context used when the project could not be analyzed
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            summary: "Unable to analyze project".to_string(),
            tech_stack: "Unknown".to_string(),
            complexity: "Unknown".to_string(),
            features: "N/A".to_string(),
            raw_response: reason.into(),
        }
    }
}

/// One question/answer exchange, in interview order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QAPair {
    pub question: String,
    pub answer: String,
}

impl QAPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Scored outcome of an interview session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub clarity: f64,
    pub technical_depth: f64,
    pub completeness: f64,
    pub final_score: f64,
    pub feedback: String,
    pub raw_response: String,
}

impl Evaluation {
    pub const NEUTRAL_SCORE: f64 = 5.0;

    /// Build an evaluation from sub-scores, deriving the final score
    pub fn from_scores(
        clarity: f64,
        technical_depth: f64,
        completeness: f64,
        feedback: String,
        raw_response: String,
    ) -> Self {
        Self {
            clarity,
            technical_depth,
            completeness,
            final_score: scoring::aggregate(clarity, technical_depth, completeness),
            feedback,
            raw_response,
        }
    }

    /// Middle-of-the-road evaluation used when scoring failed
    pub fn neutral(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            clarity: Self::NEUTRAL_SCORE,
            technical_depth: Self::NEUTRAL_SCORE,
            completeness: Self::NEUTRAL_SCORE,
            final_score: Self::NEUTRAL_SCORE,
            feedback: format!(
                "Unable to complete evaluation due to technical error: {}",
                reason
            ),
            raw_response: reason,
        }
    }

    pub fn interpretation(&self) -> &'static str {
        scoring::interpret(self.final_score)
    }
}
