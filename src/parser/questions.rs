use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::fields::TagMatcher;
use super::tags::{FOLLOWUP, QUESTION};

/// Strict `Q<n>:` answers shorter than this are discarded.
const MIN_TAGGED_QUESTION_CHARS: usize = 10;

/// Untagged lines must be longer than this to count as a question.
const MIN_SCANNED_QUESTION_CHARS: usize = 20;

static QUESTION_MATCHER: Lazy<TagMatcher> =
    Lazy::new(|| TagMatcher::new(&[QUESTION]).expect("valid question tag"));

static FOLLOWUP_MATCHER: Lazy<TagMatcher> =
    Lazy::new(|| TagMatcher::new(&[FOLLOWUP]).expect("valid followup tag"));

static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d.\-*)]+\s*").expect("valid list marker regex"));

type QuestionStrategy = fn(&str) -> Vec<String>;
type FollowupStrategy = fn(&str) -> Option<String>;

/// Question extraction strategies, most structured first
const QUESTION_STRATEGIES: [(&str, QuestionStrategy); 2] = [
    ("tagged", tagged_questions),
    ("line-scan", scanned_questions),
];

const FOLLOWUP_STRATEGIES: [(&str, FollowupStrategy); 3] = [
    ("tagged", tagged_followup),
    ("question-line", first_question_line),
    ("raw", raw_followup),
];

/// Extract interview questions from a model response.
///
/// Strategies run in order; the first one producing at least `required`
/// questions wins. Otherwise the strategy with the most questions wins,
/// the earlier one on ties. The result may be empty.
pub fn parse_questions(response: &str, required: usize) -> Vec<String> {
    let mut best: Vec<String> = Vec::new();

    for (name, strategy) in QUESTION_STRATEGIES {
        let questions = strategy(response);
        debug!(strategy = name, found = questions.len(), "question extraction");

        if questions.len() >= required {
            return questions;
        }
        if questions.len() > best.len() {
            best = questions;
        }
    }

    best
}

/// Extract a single follow-up question.
///
/// Prefers a `FOLLOWUP:` field, then the first line containing `?`, then
/// the whole trimmed response.
pub fn parse_followup(response: &str) -> String {
    for (name, strategy) in FOLLOWUP_STRATEGIES {
        if let Some(question) = strategy(response) {
            debug!(strategy = name, "follow-up extraction");
            return question;
        }
    }
    String::new()
}

fn tagged_questions(response: &str) -> Vec<String> {
    // A mid-line `Q<n>:` belongs to the question before it
    QUESTION_MATCHER
        .spans(response)
        .into_iter()
        .filter(|span| span.starts_line)
        .map(|span| span.value)
        .filter(|q| q.chars().count() > MIN_TAGGED_QUESTION_CHARS)
        .map(str::to_string)
        .collect()
}

fn scanned_questions(response: &str) -> Vec<String> {
    response
        .lines()
        .map(|line| LIST_MARKER_RE.replace(line.trim(), "").into_owned())
        .filter(|line| line.contains('?') && line.chars().count() > MIN_SCANNED_QUESTION_CHARS)
        .collect()
}

fn tagged_followup(response: &str) -> Option<String> {
    let value = FOLLOWUP_MATCHER.field(response, FOLLOWUP);
    (!value.is_empty()).then(|| value.to_string())
}

fn first_question_line(response: &str) -> Option<String> {
    response
        .lines()
        .find(|line| line.contains('?'))
        .map(|line| line.trim().to_string())
}

fn raw_followup(response: &str) -> Option<String> {
    let trimmed = response.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
