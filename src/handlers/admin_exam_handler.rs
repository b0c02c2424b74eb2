use actix_web::{delete, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AdminMiddleware, AuthMiddleware},
    errors::AppError,
    models::dto::request::ExamRequest,
    repositories::UpdateOutcome,
};

#[post("")]
async fn create_exam(
    state: web::Data<AppState>,
    request: web::Json<ExamRequest>,
) -> Result<HttpResponse, AppError> {
    let exam = state.exam_service.create_exam(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(exam))
}

#[put("/{id}")]
async fn update_exam(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<ExamRequest>,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .exam_service
        .update_exam(&id, request.into_inner())
        .await?;

    Ok(match outcome {
        UpdateOutcome::Unchanged => HttpResponse::NoContent().finish(),
        _ => HttpResponse::Ok().json(serde_json::json!({ "message": "Exam updated" })),
    })
}

#[delete("/{id}")]
async fn delete_exam(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.exam_service.delete_exam(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/exams")
            .wrap(AdminMiddleware)
            .wrap(AuthMiddleware)
            .service(create_exam)
            .service(update_exam)
            .service(delete_exam),
    );
}
