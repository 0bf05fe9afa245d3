use std::fmt;

/// A field label the model is asked to emit, e.g. `SUMMARY:`.
///
/// The same constants render the prompt format instructions and drive the
/// parser, so what is asked of the model and what is read back cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    /// Canonical label as written in prompts
    pub name: &'static str,
    /// Regex fragment matching the label (without the colon)
    pub(crate) pattern: &'static str,
    /// Value always runs to the end of the text, even past other labels
    pub(crate) terminal: bool,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub const SUMMARY: Tag = Tag {
    name: "SUMMARY",
    pattern: "SUMMARY",
    terminal: false,
};
pub const TECH_STACK: Tag = Tag {
    name: "TECH_STACK",
    pattern: "TECH_STACK",
    terminal: false,
};
pub const COMPLEXITY: Tag = Tag {
    name: "COMPLEXITY",
    pattern: "COMPLEXITY",
    terminal: false,
};
pub const FEATURES: Tag = Tag {
    name: "FEATURES",
    pattern: "FEATURES",
    terminal: false,
};

pub const CLARITY: Tag = Tag {
    name: "CLARITY",
    pattern: "CLARITY",
    terminal: false,
};
pub const TECHNICAL_DEPTH: Tag = Tag {
    name: "TECHNICAL_DEPTH",
    pattern: r"TECHNICAL[_\s]DEPTH",
    terminal: false,
};
pub const COMPLETENESS: Tag = Tag {
    name: "COMPLETENESS",
    pattern: "COMPLETENESS",
    terminal: false,
};
pub const FEEDBACK: Tag = Tag {
    name: "FEEDBACK",
    pattern: "FEEDBACK",
    terminal: true,
};

/// Numbered question label; rendered as `Q1`, `Q2`, ...
pub const QUESTION: Tag = Tag {
    name: "Q",
    pattern: r"Q\d+",
    terminal: false,
};
pub const FOLLOWUP: Tag = Tag {
    name: "FOLLOWUP",
    pattern: "FOLLOWUP",
    terminal: true,
};

pub const UNDERSTANDING_TAGS: [Tag; 4] = [SUMMARY, TECH_STACK, COMPLEXITY, FEATURES];
pub const EVALUATION_TAGS: [Tag; 4] = [CLARITY, TECHNICAL_DEPTH, COMPLETENESS, FEEDBACK];

/// Label for the n-th (1-based) question, e.g. `Q2`
pub fn question_label(n: usize) -> String {
    format!("{}{}", QUESTION.name, n)
}
