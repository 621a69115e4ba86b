pub mod health_handler;
pub mod quiz_handler;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::errors::AppError;

pub use health_handler::{health_check, health_check_ready};
pub use quiz_handler::{
    create_session, get_current_question, get_results, get_session, list_topics, next_question,
    submit_answer,
};

pub const API_SCOPE: &str = "/api/quiz";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(health_check)
        .service(health_check_ready)
        .service(
            web::scope(API_SCOPE)
                .service(create_session)
                .service(get_session)
                .service(get_current_question)
                .service(submit_answer)
                .service(next_question)
                .service(get_results)
                .service(list_topics),
        );
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid request body: {}", err)).into()
}
