use project_interviewer::models::{PerceptionData, ProjectContext, QAPair};
use project_interviewer::parser::{tags, TagMatcher};
use project_interviewer::prompts;

fn context() -> ProjectContext {
    ProjectContext {
        summary: "A task tracker with offline sync.".to_string(),
        tech_stack: "Rust, SQLite".to_string(),
        complexity: "Intermediate".to_string(),
        features: "- offline sync".to_string(),
        raw_response: String::new(),
    }
}

#[test]
fn test_understanding_prompt_embeds_perception_and_labels() {
    let perception = PerceptionData {
        screen_text: "--- Screen 1 ---\nfn main() {}".to_string(),
        audio_transcript: "[1] This is my project".to_string(),
    };

    let prompt = prompts::understanding_prompt(&perception);

    assert!(prompt.contains("--- Screen 1 ---\nfn main() {}"));
    assert!(prompt.contains("[1] This is my project"));

    let matcher = TagMatcher::new(&tags::UNDERSTANDING_TAGS).unwrap();
    let found: Vec<_> = matcher.spans(&prompt).into_iter().map(|s| s.tag).collect();
    assert_eq!(found, tags::UNDERSTANDING_TAGS.to_vec());
}

#[test]
fn test_interview_prompt_requests_tagged_questions() {
    let prompt = prompts::interview_prompt(&context(), &[]);

    assert!(prompt.contains("Project Summary: A task tracker with offline sync."));
    assert!(prompt.contains("Technology Stack: Rust, SQLite"));
    assert!(prompt.contains("Complexity Level: Intermediate"));
    assert!(!prompt.contains("Previous Q&A"));

    for n in 1..=prompts::QUESTIONS_PER_ROUND {
        assert!(prompt.contains(&format!("{}: <question>", tags::question_label(n))));
    }

    let matcher = TagMatcher::new(&[tags::QUESTION]).unwrap();
    assert_eq!(matcher.spans(&prompt).len(), prompts::QUESTIONS_PER_ROUND);
}

#[test]
fn test_interview_prompt_includes_history() {
    let history = vec![QAPair::new("Why SQLite?", "It is embedded.")];

    let prompt = prompts::interview_prompt(&context(), &history);

    assert!(prompt.contains("Previous Q&A:\nQ: Why SQLite?\nA: It is embedded."));
}

#[test]
fn test_followup_prompt() {
    let prompt = prompts::followup_prompt("Why SQLite?", "It is embedded.", &context());

    assert!(prompt.contains("Original Question: Why SQLite?"));
    assert!(prompt.contains("Student's Answer: It is embedded."));
    assert!(prompt.contains("FOLLOWUP: <question>"));
}

#[test]
fn test_evaluation_prompt_numbers_history() {
    let history = vec![
        QAPair::new("Why SQLite?", "It is embedded."),
        QAPair::new("How do you sync?", "With a change log."),
    ];

    let prompt = prompts::evaluation_prompt(&context(), &history);

    assert!(prompt.contains("Q1: Why SQLite?\nA1: It is embedded."));
    assert!(prompt.contains("Q2: How do you sync?\nA2: With a change log."));

    let matcher = TagMatcher::new(&tags::EVALUATION_TAGS).unwrap();
    let found: Vec<_> = matcher.spans(&prompt).into_iter().map(|s| s.tag).collect();
    assert_eq!(found, tags::EVALUATION_TAGS.to_vec());
}
