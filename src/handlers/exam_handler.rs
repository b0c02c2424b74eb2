use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AuthMiddleware, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{ExamListQuery, ExamResultQuery, SubmitExamRequest},
};

#[get("")]
async fn list_exams(
    state: web::Data<AppState>,
    query: web::Query<ExamListQuery>,
) -> Result<HttpResponse, AppError> {
    let response = state.exam_service.list_exams(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/results")]
async fn list_results(
    state: web::Data<AppState>,
    query: web::Query<ExamResultQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .exam_service
        .list_results(&auth.0.subject_id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{id}")]
async fn get_exam(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let exam = state.exam_service.get_exam(&id).await?;
    Ok(HttpResponse::Ok().json(exam))
}

#[post("/{id}/submit")]
async fn submit_exam(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitExamRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state
        .exam_service
        .submit_exam(&id, &auth.0.subject_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // `/results` must be registered before `/{id}`
    cfg.service(
        web::scope("/exams")
            .wrap(AuthMiddleware)
            .service(list_exams)
            .service(list_results)
            .service(get_exam)
            .service(submit_exam),
    );
}
