pub mod question_repository;
pub mod session_repository;

pub use question_repository::{FileQuestionRepository, MigrationReport, QuestionRepository};
pub use session_repository::{InMemorySessionRepository, SessionRepository};
