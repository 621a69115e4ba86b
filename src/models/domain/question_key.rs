use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, AppResult};

pub const COMPONENT_SEPARATOR: &str = "__";
const WORD_SEPARATOR: &str = "_";

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{Alphabetic}\p{N}]+").expect("NON_ALPHANUMERIC is a valid regex pattern")
});

/// Lowercases, trims and collapses every run of characters that are neither letters nor
/// digits (in any script) into a single `_`. Returns `None` when nothing is left.
pub fn normalize_component(raw: &str) -> Option<String> {
    let lowered = raw.trim().to_lowercase();
    let collapsed = NON_ALPHANUMERIC.replace_all(&lowered, WORD_SEPARATOR);
    let trimmed = collapsed.trim_matches('_');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalized (topic, subtopic, grade, curriculum) identifying one stored collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuestionKey {
    topic: String,
    subtopic: Option<String>,
    grade_level: Option<String>,
    curriculum: Option<String>,
}

impl QuestionKey {
    pub fn new(
        topic: &str,
        subtopic: Option<&str>,
        grade_level: Option<&str>,
        curriculum: Option<&str>,
    ) -> AppResult<Self> {
        let raw_topic = topic.trim();
        if raw_topic.is_empty() {
            return Err(AppError::ValidationError("Topic is required".to_string()));
        }
        let topic = normalize_component(raw_topic).unwrap_or_else(|| encode_symbols(raw_topic));

        Ok(QuestionKey {
            topic,
            subtopic: subtopic.and_then(normalize_component),
            grade_level: grade_level.and_then(normalize_component),
            curriculum: curriculum.and_then(normalize_component),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn subtopic(&self) -> Option<&str> {
        self.subtopic.as_deref()
    }

    pub fn grade_level(&self) -> Option<&str> {
        self.grade_level.as_deref()
    }

    pub fn curriculum(&self) -> Option<&str> {
        self.curriculum.as_deref()
    }

    /// Present components joined by `__`, e.g. `math__algebra__grade_5`.
    pub fn storage_key(&self) -> String {
        std::iter::once(self.topic.as_str())
            .chain(self.subtopic.as_deref())
            .chain(self.grade_level.as_deref())
            .chain(self.curriculum.as_deref())
            .collect::<Vec<_>>()
            .join(COMPONENT_SEPARATOR)
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.storage_key())
    }
}

/// Stable key component for a topic made only of symbols, e.g. `"???"` -> `x3f3f3f`.
fn encode_symbols(raw: &str) -> String {
    raw.bytes().fold(String::from("x"), |mut encoded, byte| {
        encoded.push_str(&format!("{:02x}", byte));
        encoded
    })
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}
