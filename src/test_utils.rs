use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::AppResult,
    models::domain::{Question, QuestionKey, TopicRecord},
    repositories::{MigrationReport, QuestionRepository},
};

pub mod fixtures {
    use crate::models::domain::{GeneratedQuestion, Question};

    /// A well-formed generated question whose correct option is index 2.
    pub fn generated_question(text: &str) -> GeneratedQuestion {
        GeneratedQuestion {
            question: text.to_string(),
            options: vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            correct_answer: 2,
            explanation: Some(format!("Explanation for {}", text)),
            grade_level: None,
            curriculum: None,
        }
    }

    pub fn question(id: &str, text: &str) -> Question {
        Question::from_generated(id, generated_question(text))
    }
}

/// Keyed by storage key; mirrors the file store's duplicate handling.
#[derive(Default)]
pub struct InMemoryQuestionRepository {
    collections: RwLock<HashMap<QuestionKey, Vec<Question>>>,
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn fetch_questions(&self, key: &QuestionKey) -> AppResult<Vec<Question>> {
        let collections = self.collections.read().await;
        Ok(collections.get(key).cloned().unwrap_or_default())
    }

    async fn save_question(&self, key: &QuestionKey, question: Question) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        let questions = collections.entry(key.clone()).or_default();
        if questions.iter().any(|q| q.same_prompt(&question)) {
            return Ok(false);
        }
        questions.push(question);
        Ok(true)
    }

    async fn list_topics(&self) -> AppResult<Vec<TopicRecord>> {
        let collections = self.collections.read().await;
        let mut topics: Vec<TopicRecord> = collections
            .iter()
            .map(|(key, questions)| TopicRecord {
                topic: key.topic().replace('_', " "),
                subtopic: key.subtopic().map(|s| s.replace('_', " ")),
                question_count: questions.len(),
            })
            .collect();
        topics.sort_by(TopicRecord::listing_order);
        Ok(topics)
    }

    async fn migrate_legacy_layout(&self) -> AppResult<MigrationReport> {
        Ok(MigrationReport {
            already_current: true,
            ..Default::default()
        })
    }
}

pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_question_is_well_formed() {
        let question = fixtures::question("q1", "What is 6 x 7?");
        assert_eq!(question.id, "q1");
        assert_eq!(question.options.len(), 4);
        assert!(question.is_correct(2));
    }

    #[tokio::test]
    async fn test_in_memory_repository_deduplicates() {
        let repo = InMemoryQuestionRepository::default();
        let key = QuestionKey::new("math", None, None, None).unwrap();

        assert!(repo
            .save_question(&key, fixtures::question("a", "Same text"))
            .await
            .unwrap());
        assert!(!repo
            .save_question(&key, fixtures::question("b", "Same text"))
            .await
            .unwrap());
        assert_eq!(repo.fetch_questions(&key).await.unwrap().len(), 1);
    }
}
