use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::{
        FileQuestionRepository, InMemorySessionRepository, QuestionRepository, SessionRepository,
    },
    services::{
        question_generator::{OllamaQuestionGenerator, QuestionGenerator},
        question_source::QuestionSource,
        session_service::SessionService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub question_repository: Arc<dyn QuestionRepository>,
    pub session_repository: Arc<dyn SessionRepository>,
    pub question_source: Arc<QuestionSource>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let question_repository = Arc::new(FileQuestionRepository::new(&config.questions_dir));
        question_repository.ensure_storage_dir().await?;

        let generator = Arc::new(OllamaQuestionGenerator::from_config(&config)?);
        let session_repository = Arc::new(InMemorySessionRepository::new(config.session_ttl()));

        Ok(Self::from_parts(
            config,
            question_repository,
            generator,
            session_repository,
        ))
    }

    pub fn from_parts(
        config: Config,
        question_repository: Arc<dyn QuestionRepository>,
        generator: Arc<dyn QuestionGenerator>,
        session_repository: Arc<dyn SessionRepository>,
    ) -> Self {
        let question_source = Arc::new(QuestionSource::new(generator));
        let session_service = Arc::new(SessionService::new(
            question_repository.clone(),
            question_source.clone(),
            session_repository.clone(),
        ));

        Self {
            session_service,
            question_repository,
            session_repository,
            question_source,
            config: Arc::new(config),
        }
    }
}
