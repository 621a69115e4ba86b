use serde::{Deserialize, Serialize};
use validator::Validate;

pub const OPTION_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curriculum: Option<String>,
}

impl Question {
    pub fn from_generated(id: impl Into<String>, generated: GeneratedQuestion) -> Self {
        Question {
            id: id.into(),
            question: generated.question,
            options: generated.options,
            correct_answer: generated.correct_answer,
            explanation: generated.explanation,
            grade_level: generated.grade_level,
            curriculum: generated.curriculum,
        }
    }

    pub fn is_correct(&self, answer_index: usize) -> bool {
        self.correct_answer == answer_index
    }

    /// Non-empty text, exactly four options and a correct index pointing at one of them.
    pub fn is_well_formed(&self) -> bool {
        !self.question.trim().is_empty()
            && self.options.len() == OPTION_COUNT
            && self.correct_answer < OPTION_COUNT
    }

    /// Same question text, ignoring surrounding whitespace.
    pub fn same_prompt(&self, other: &Question) -> bool {
        self.question.trim() == other.question.trim()
    }
}

/// Question content as produced by a generator, before it is given an id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    #[validate(length(min = 1, message = "question text must not be empty"))]
    pub question: String,
    #[validate(length(equal = 4, message = "exactly four options are required"))]
    pub options: Vec<String>,
    #[validate(range(max = 3, message = "correct answer must be between 0 and 3"))]
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub curriculum: Option<String>,
}
