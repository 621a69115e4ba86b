use serde::Deserialize;
use validator::Validate;

pub const MAX_QUESTION_COUNT: usize = 50;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[validate(required(message = "Topic is required"))]
    pub topic: Option<String>,

    #[serde(default)]
    pub subtopic: Option<String>,

    #[serde(default)]
    pub grade_level: Option<String>,

    #[serde(default)]
    pub curriculum: Option<String>,

    #[serde(default)]
    #[validate(range(
        min = 1,
        max = MAX_QUESTION_COUNT,
        message = "questionCount must be between 1 and 50"
    ))]
    pub question_count: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, message = "questionId is required"))]
    pub question_id: String,

    #[validate(range(min = 0, max = 3, message = "Invalid answer index"))]
    pub answer_index: i64,
}

/// Blank strings from form fields count as absent.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
