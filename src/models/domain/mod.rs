pub mod question;
pub mod question_key;
pub mod quiz_session;
pub mod topic;
pub use question::{GeneratedQuestion, Question};
pub use question_key::QuestionKey;
pub use quiz_session::{QuizSession, SessionResults};
pub use topic::TopicRecord;
