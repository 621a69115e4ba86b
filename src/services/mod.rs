pub mod background_tasks;
pub mod question_generator;
pub mod question_source;
pub mod session_service;
