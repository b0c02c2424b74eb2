use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AuthMiddleware, AuthenticatedUser, IdentitySpace},
    errors::{AppError, AppResult},
    models::dto::request::{LoginRequest, RegisterRequest},
};

pub const REFRESH_TOKEN_HEADER: &str = "refresh_token";

/// Raw value of the `refresh_token` header. Absent or unreadable is forbidden.
pub(crate) fn refresh_token_header(req: &HttpRequest) -> AppResult<String> {
    req.headers()
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(AppError::forbidden)
}

#[post("/login")]
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let pair = state
        .session_service
        .login(IdentitySpace::User, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(pair))
}

#[post("/register")]
async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let pair = state.session_service.register(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(pair))
}

#[get("/refresh_token")]
async fn refresh_token(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let token = refresh_token_header(&req)?;
    let pair = state
        .refresh_service
        .refresh(&token, IdentitySpace::User)
        .await?;
    Ok(HttpResponse::Ok().json(pair))
}

#[get("/validate", wrap = "AuthMiddleware")]
async fn validate(auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(auth.0)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(login)
            .service(register)
            .service(refresh_token)
            .service(validate),
    );
}
