pub mod fallback_questions;
pub mod quiz_prompt;
