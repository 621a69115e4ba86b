use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        request::{non_blank, CreateSessionRequest, SubmitAnswerRequest},
        response::AnswerResponse,
    },
    services::session_service::CreateSessionParams,
};

#[post("/session")]
pub async fn create_session(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CreateSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let topic = non_blank(&request.topic)
        .ok_or_else(|| AppError::ValidationError("Topic is required".to_string()))?;

    let params = CreateSessionParams {
        topic: topic.to_string(),
        subtopic: non_blank(&request.subtopic).map(str::to_string),
        grade_level: non_blank(&request.grade_level).map(str::to_string),
        curriculum: non_blank(&request.curriculum).map(str::to_string),
        question_count: request
            .question_count
            .unwrap_or(state.config.default_question_count),
    };
    log::info!(
        "[{}] Creating session for topic '{}' ({} questions)",
        get_request_id(&req).unwrap_or_default(),
        params.topic,
        params.question_count
    );

    let session = state.session_service.create_session(params).await?;
    Ok(HttpResponse::Created().json(session))
}

#[get("/session/{id}")]
pub async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session = state.session_service.get_session(&id).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[get("/session/{id}/current")]
pub async fn get_current_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let question = state.session_service.get_current_question(&id).await?;
    Ok(HttpResponse::Ok().json(question))
}

#[post("/session/{id}/answer")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let is_correct = state
        .session_service
        .submit_answer(&id, &request.question_id, request.answer_index as usize)
        .await?;
    Ok(HttpResponse::Ok().json(AnswerResponse { is_correct }))
}

#[post("/session/{id}/next")]
pub async fn next_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let question = state.session_service.advance(&id).await?;
    Ok(HttpResponse::Ok().json(question))
}

#[get("/session/{id}/results")]
pub async fn get_results(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let results = state.session_service.results(&id).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[get("/topics")]
pub async fn list_topics(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let topics = state.question_repository.list_topics().await?;
    Ok(HttpResponse::Ok().json(topics))
}
