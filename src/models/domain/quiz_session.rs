use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::question::Question,
};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    pub id: String,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtopic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curriculum: Option<String>,
    pub questions: Vec<Question>,
    pub current_question_index: usize,
    pub answers: HashMap<String, usize>,
    pub score: usize,
    pub total_questions: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionResults {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
}

impl QuizSession {
    pub fn new(
        topic: &str,
        subtopic: Option<&str>,
        grade_level: Option<&str>,
        curriculum: Option<&str>,
        questions: Vec<Question>,
    ) -> Self {
        QuizSession {
            id: Uuid::new_v4().simple().to_string(),
            topic: topic.to_string(),
            subtopic: subtopic.map(str::to_string),
            grade_level: grade_level.map(str::to_string),
            curriculum: curriculum.map(str::to_string),
            total_questions: questions.len(),
            questions,
            current_question_index: 0,
            answers: HashMap::new(),
            score: 0,
            created_at: Utc::now(),
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_question_index >= self.total_questions
    }

    /// Moves to the next question. The index never passes `total_questions`.
    pub fn advance(&mut self) -> Option<&Question> {
        if self.current_question_index < self.total_questions {
            self.current_question_index += 1;
        }
        self.current_question()
    }

    /// Records an answer for any question in the session and reports whether it was
    /// correct. Only the first submission for a question id can change the score;
    /// later submissions overwrite the stored answer without re-scoring.
    pub fn record_answer(&mut self, question_id: &str, answer_index: usize) -> AppResult<bool> {
        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Question '{}' not found in session '{}'",
                    question_id, self.id
                ))
            })?;

        let is_correct = question.is_correct(answer_index);
        let first_submission = self
            .answers
            .insert(question_id.to_string(), answer_index)
            .is_none();

        if first_submission && is_correct {
            self.score += 1;
        }

        Ok(is_correct)
    }

    pub fn results(&self) -> SessionResults {
        let percentage = if self.total_questions == 0 {
            0
        } else {
            (100.0 * self.score as f64 / self.total_questions as f64).round() as u32
        };

        SessionResults {
            score: self.score,
            total: self.total_questions,
            percentage,
        }
    }
}
