use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    models::dto::response::{HealthResponse, ReadinessResponse},
};

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::ok())
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let generator_available = state.question_source.is_available().await;
    if !generator_available {
        log::warn!("Question generator is unreachable; fallback questions will be served");
    }

    HttpResponse::Ok().json(ReadinessResponse::with_generator(generator_available))
}
