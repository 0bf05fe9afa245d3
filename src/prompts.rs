//! Prompt templates for each interview stage
//!
//! Every template ends with format instructions built from the parser's tag
//! constants, so the labels requested here are exactly the ones decoded.

use std::fmt::Write;

use crate::models::{PerceptionData, ProjectContext, QAPair};
use crate::parser::tags::{
    self, CLARITY, COMPLETENESS, COMPLEXITY, FEATURES, FEEDBACK, FOLLOWUP, SUMMARY,
    TECHNICAL_DEPTH, TECH_STACK,
};

/// Number of questions requested from the model in one round
pub const QUESTIONS_PER_ROUND: usize = 3;

pub fn understanding_prompt(perception: &PerceptionData) -> String {
    format!(
        "Analyze the following project presentation data and extract key information.

Screen Content:
{screen}

Audio Transcript:
{audio}

Please provide:
1. Project Summary (2-3 sentences)
2. Technology Stack (list main technologies)
3. Complexity Level (Beginner/Intermediate/Advanced)
4. Key Features (bullet points)

Format your response as:
{SUMMARY}: <summary>
{TECH_STACK}: <technologies>
{COMPLEXITY}: <level>
{FEATURES}: <features>
",
        screen = perception.screen_text,
        audio = perception.audio_transcript,
    )
}

pub fn interview_prompt(context: &ProjectContext, history: &[QAPair]) -> String {
    let mut previous = String::new();
    if !history.is_empty() {
        previous.push_str("\nPrevious Q&A:\n");
        for qa in history {
            let _ = writeln!(previous, "Q: {}\nA: {}", qa.question, qa.answer);
        }
    }

    let format_lines: String = (1..=QUESTIONS_PER_ROUND)
        .map(|n| format!("{}: <question>\n", tags::question_label(n)))
        .collect();

    format!(
        "You are an expert technical interviewer. Based on the project information below, generate {count} relevant technical questions.

Project Summary: {summary}
Technology Stack: {tech_stack}
Complexity Level: {complexity}
{previous}
Generate {count} technical questions that:
- Test understanding of the technologies used
- Probe into design decisions
- Explore implementation details
- Are appropriate for the complexity level

Format as:
{format_lines}",
        count = QUESTIONS_PER_ROUND,
        summary = context.summary,
        tech_stack = context.tech_stack,
        complexity = context.complexity,
    )
}

pub fn followup_prompt(question: &str, answer: &str, context: &ProjectContext) -> String {
    format!(
        "You are an expert technical interviewer. Based on the student's answer, generate 1 relevant follow-up question.

Project Summary: {summary}
Original Question: {question}
Student's Answer: {answer}

Generate a follow-up question that:
- Digs deeper into their understanding
- Clarifies vague points
- Explores edge cases or alternatives

Format as:
{FOLLOWUP}: <question>
",
        summary = context.summary,
    )
}

pub fn evaluation_prompt(context: &ProjectContext, history: &[QAPair]) -> String {
    let mut transcript = String::new();
    for (i, qa) in history.iter().enumerate() {
        let n = i + 1;
        let _ = write!(transcript, "\nQ{n}: {}\nA{n}: {}\n", qa.question, qa.answer);
    }

    format!(
        "You are an expert evaluator. Score the student's interview performance.

Project: {summary}

Interview Transcript:
{transcript}

Evaluate on:
1. Clarity (1-10): How clear and articulate were the answers?
2. Technical Depth (1-10): How deep was the technical understanding?
3. Completeness (1-10): How complete were the explanations?

Provide scores and detailed feedback.

Format as:
{CLARITY}: <score>
{TECHNICAL_DEPTH}: <score>
{COMPLETENESS}: <score>
{FEEDBACK}: <detailed feedback>
",
        summary = context.summary,
    )
}
