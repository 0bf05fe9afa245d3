//! Best-effort decoding of free-form model responses
//!
//! Model output is never rejected. Each decoder walks a fallback chain
//! (tagged fields, then heuristics, then the raw text) and always returns a
//! value of the expected shape.

mod fields;
mod questions;
pub mod tags;

use once_cell::sync::Lazy;

use crate::models::{Evaluation, ProjectContext};

pub use fields::{leading_number, TagMatcher, TaggedSpan};
pub use questions::{parse_followup, parse_questions};
pub use tags::Tag;

/// Characters of raw response kept as the summary when no tags are found
pub const SUMMARY_FALLBACK_CHARS: usize = 500;

static UNDERSTANDING_MATCHER: Lazy<TagMatcher> =
    Lazy::new(|| TagMatcher::new(&tags::UNDERSTANDING_TAGS).expect("valid understanding tags"));

static EVALUATION_MATCHER: Lazy<TagMatcher> =
    Lazy::new(|| TagMatcher::new(&tags::EVALUATION_TAGS).expect("valid evaluation tags"));

/// Decode a project analysis response.
///
/// Without a `SUMMARY:` field the first 500 characters of the response
/// stand in for the summary.
pub fn parse_project_context(response: &str) -> ProjectContext {
    let fields = UNDERSTANDING_MATCHER.fields(response);

    let mut summary = fields[0].to_string();
    if summary.is_empty() && !response.is_empty() {
        summary = response.chars().take(SUMMARY_FALLBACK_CHARS).collect();
    }

    ProjectContext {
        summary,
        tech_stack: fields[1].to_string(),
        complexity: fields[2].to_string(),
        features: fields[3].to_string(),
        raw_response: response.to_string(),
    }
}

/// Decode an evaluation response and derive the weighted final score.
///
/// Missing scores read as `0.0`; a missing `FEEDBACK:` field makes the whole
/// response the feedback.
pub fn parse_evaluation(response: &str) -> Evaluation {
    let fields = EVALUATION_MATCHER.fields(response);

    let feedback = match fields[3] {
        "" => response.trim().to_string(),
        tagged => tagged.to_string(),
    };

    Evaluation::from_scores(
        leading_number(fields[0]),
        leading_number(fields[1]),
        leading_number(fields[2]),
        feedback,
        response.to_string(),
    )
}
