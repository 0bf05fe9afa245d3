use once_cell::sync::Lazy;
use regex::Regex;

use super::tags::Tag;

static LEADING_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)").expect("valid number regex"));

/// One occurrence of a tag in a response, with the text it labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSpan<'a> {
    pub tag: Tag,
    pub value: &'a str,
    /// Whether the label opens its line (only indentation or markdown before it)
    pub starts_line: bool,
}

/// Finds `LABEL: value` fields for a fixed set of tags.
///
/// A value runs from the colon to the line holding the next recognized
/// label that starts a line, or to the end of the text. Values of terminal
/// tags (`FEEDBACK:`, `FOLLOWUP:`) always run to the end of the text.
/// Markdown bold around the label (`**SUMMARY:**`) is part of the label.
#[derive(Debug)]
pub struct TagMatcher {
    tags: Vec<Tag>,
    regex: Regex,
}

struct Hit {
    tag: usize,
    end: usize,
    /// Offset of the hit's line when the label opens that line
    line_start: Option<usize>,
}

impl TagMatcher {
    pub fn new(tags: &[Tag]) -> Result<Self, regex::Error> {
        let alternatives = tags
            .iter()
            .map(|tag| format!("({})", tag.pattern))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!(r"(?i)\b(?:{})(?:\*\*)?[ \t]*:(?:\*\*)?", alternatives))?;

        Ok(Self {
            tags: tags.to_vec(),
            regex,
        })
    }

    /// Every tagged span in order of appearance
    pub fn spans<'a>(&self, text: &'a str) -> Vec<TaggedSpan<'a>> {
        let hits: Vec<Hit> = self
            .regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let tag = (1..=self.tags.len()).find(|&i| caps.get(i).is_some())? - 1;
                Some(Hit {
                    tag,
                    end: whole.end(),
                    line_start: line_start(text, whole.start()),
                })
            })
            .collect();

        hits.iter()
            .enumerate()
            .map(|(i, hit)| {
                let tag = self.tags[hit.tag];
                let stop = if tag.terminal {
                    text.len()
                } else {
                    hits[i + 1..]
                        .iter()
                        .find_map(|next| next.line_start)
                        .map_or(text.len(), |start| start.max(hit.end))
                };
                TaggedSpan {
                    tag,
                    value: text[hit.end..stop].trim(),
                    starts_line: hit.line_start.is_some(),
                }
            })
            .collect()
    }

    /// Value of the first occurrence of `tag`, or `""` when absent
    pub fn field<'a>(&self, text: &'a str, tag: Tag) -> &'a str {
        self.spans(text)
            .into_iter()
            .find(|span| span.tag == tag)
            .map_or("", |span| span.value)
    }

    /// First-occurrence value of every tag, in tag order
    pub fn fields<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let spans = self.spans(text);
        self.tags
            .iter()
            .map(|tag| {
                spans
                    .iter()
                    .find(|span| span.tag == *tag)
                    .map_or("", |span| span.value)
            })
            .collect()
    }
}

/// Leading decimal number of a field value, `0.0` when there is none
pub fn leading_number(value: &str) -> f64 {
    LEADING_NUMBER_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// Start of the line containing `pos`, if only indentation or markdown
/// markers precede `pos` on that line
fn line_start(text: &str, pos: usize) -> Option<usize> {
    let start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    text[start..pos]
        .chars()
        .all(|c| c.is_whitespace() || matches!(c, '*' | '#' | '>'))
        .then_some(start)
}
