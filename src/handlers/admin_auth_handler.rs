use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AdminMiddleware, AuthMiddleware, AuthenticatedUser, IdentitySpace},
    errors::AppError,
    handlers::auth_handler::refresh_token_header,
    models::dto::request::LoginRequest,
};

#[post("/login")]
async fn admin_login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let pair = state
        .session_service
        .login(IdentitySpace::Admin, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(pair))
}

#[get("/refresh_token")]
async fn admin_refresh_token(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let token = refresh_token_header(&req)?;
    let pair = state
        .refresh_service
        .refresh(&token, IdentitySpace::Admin)
        .await?;
    Ok(HttpResponse::Ok().json(pair))
}

// The last wrap runs first: the user gate resolves the identity, then the admin gate checks it
#[get("/validate", wrap = "AdminMiddleware", wrap = "AuthMiddleware")]
async fn admin_validate(auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(auth.0)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/auth")
            .service(admin_login)
            .service(admin_refresh_token)
            .service(admin_validate),
    );
}
