use std::sync::Arc;

use rand::seq::SliceRandom;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Question, QuestionKey, QuizSession, SessionResults},
    repositories::{QuestionRepository, SessionRepository},
    services::{question_generator::GenerationRequest, question_source::QuestionSource},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSessionParams {
    pub topic: String,
    pub subtopic: Option<String>,
    pub grade_level: Option<String>,
    pub curriculum: Option<String>,
    pub question_count: usize,
}

impl CreateSessionParams {
    pub fn new(topic: &str, question_count: usize) -> Self {
        CreateSessionParams {
            topic: topic.to_string(),
            subtopic: None,
            grade_level: None,
            curriculum: None,
            question_count,
        }
    }

    fn generation_request(&self) -> GenerationRequest {
        GenerationRequest {
            topic: self.topic.clone(),
            subtopic: self.subtopic.clone(),
            grade_level: self.grade_level.clone(),
            curriculum: self.curriculum.clone(),
        }
    }
}

pub struct SessionService {
    questions: Arc<dyn QuestionRepository>,
    source: Arc<QuestionSource>,
    sessions: Arc<dyn SessionRepository>,
    // Serializes read-modify-write of sessions so concurrent answers/advances on one
    // session cannot overwrite each other.
    update_lock: Mutex<()>,
}

impl SessionService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        source: Arc<QuestionSource>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            questions,
            source,
            sessions,
            update_lock: Mutex::new(()),
        }
    }

    pub async fn create_session(&self, params: CreateSessionParams) -> AppResult<QuizSession> {
        if params.question_count == 0 {
            return Err(AppError::ValidationError(
                "questionCount must be at least 1".to_string(),
            ));
        }

        let key = QuestionKey::new(
            &params.topic,
            params.subtopic.as_deref(),
            params.grade_level.as_deref(),
            params.curriculum.as_deref(),
        )?;
        let count = params.question_count;

        let mut stored = self.questions.fetch_questions(&key).await?;
        stored.shuffle(&mut rand::thread_rng());
        stored.truncate(count);

        let request = params.generation_request();
        let missing = count - stored.len();
        let mut generated = Vec::with_capacity(missing);
        for i in 0..missing {
            log::info!(
                "Generating question {} of {} for key {}",
                i + 1,
                missing,
                key
            );
            let question = Question::from_generated(
                Uuid::new_v4().to_string(),
                self.source.generate(&request).await,
            );
            if let Err(err) = self.questions.save_question(&key, question.clone()).await {
                log::warn!("Failed to store generated question for key {}: {}", key, err);
            }
            generated.push(question);
        }

        let mut questions: Vec<Question> =
            stored.into_iter().chain(generated).take(count).collect();
        for (i, question) in questions.iter_mut().enumerate() {
            question.id = format!("q{}", i + 1);
        }
        questions.shuffle(&mut rand::thread_rng());

        let session = QuizSession::new(
            &params.topic,
            params.subtopic.as_deref(),
            params.grade_level.as_deref(),
            params.curriculum.as_deref(),
            questions,
        );
        self.sessions.put(session.clone()).await?;

        log::info!(
            "Created session {} with {} questions for key {}",
            session.id,
            session.total_questions,
            key
        );
        Ok(session)
    }

    pub async fn get_session(&self, session_id: &str) -> AppResult<QuizSession> {
        self.sessions
            .get(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", session_id)))
    }

    pub async fn get_current_question(&self, session_id: &str) -> AppResult<Question> {
        let session = self.get_session(session_id).await?;
        session
            .current_question()
            .cloned()
            .ok_or_else(|| no_more_questions(session_id))
    }

    pub async fn submit_answer(
        &self,
        session_id: &str,
        question_id: &str,
        answer_index: usize,
    ) -> AppResult<bool> {
        let _guard = self.update_lock.lock().await;
        let mut session = self.get_session(session_id).await?;

        let is_correct = session.record_answer(question_id, answer_index)?;
        self.sessions.put(session).await?;

        Ok(is_correct)
    }

    pub async fn advance(&self, session_id: &str) -> AppResult<Question> {
        let _guard = self.update_lock.lock().await;
        let mut session = self.get_session(session_id).await?;

        let next = session.advance().cloned();
        self.sessions.put(session).await?;

        next.ok_or_else(|| no_more_questions(session_id))
    }

    pub async fn results(&self, session_id: &str) -> AppResult<SessionResults> {
        let session = self.get_session(session_id).await?;
        Ok(session.results())
    }
}

fn no_more_questions(session_id: &str) -> AppError {
    AppError::NotFound(format!("No more questions in session '{}'", session_id))
}
