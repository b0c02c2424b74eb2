use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::{errors::AppError, handlers};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(handlers::health_handler::configure)
        .configure(handlers::auth_handler::configure)
        .configure(handlers::admin_auth_handler::configure)
        .configure(handlers::exam_handler::configure)
        .configure(handlers::admin_exam_handler::configure);
}

/// Malformed or mistyped JSON bodies surface as a validation error instead of
/// actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON body for {}: {}", req.path(), err);
    AppError::ValidationError("Please enter valid data!".to_string()).into()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    use super::*;
    use crate::{
        app_state::{AppState, Repositories},
        config::Config,
        test_utils::{
            fixtures::test_account,
            memory::{
                InMemoryExamRepository, InMemoryExamResultRepository, InMemoryIdentityRepository,
                InMemoryRefreshTokenRepository,
            },
            test_helpers::assert_success_status,
        },
    };

    fn state() -> AppState {
        AppState::from_repositories(
            Config::test_config(),
            Repositories {
                users: Arc::new(InMemoryIdentityRepository::with_accounts(vec![test_account()])),
                admins: Arc::new(InMemoryIdentityRepository::new()),
                refresh_tokens: Arc::new(InMemoryRefreshTokenRepository::new()),
                exams: Arc::new(InMemoryExamRepository::new()),
                exam_results: Arc::new(InMemoryExamResultRepository::new()),
            },
        )
    }

    #[actix_web::test]
    async fn test_health_route() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());

        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
    }

    #[actix_web::test]
    async fn test_malformed_json_is_a_validation_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Please enter valid data!");
    }

    #[actix_web::test]
    async fn test_login_then_validate() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(serde_json::json!({ "email": "ann@example.com", "password": "Abcd!234" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let pair: Value = test::read_body_json(resp).await;
        let access = pair["access_token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/auth/validate")
            .insert_header(("access_token", access.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let identity: Value = test::read_body_json(resp).await;
        assert!(identity["_id"].is_string());

        let req = test::TestRequest::get()
            .uri("/admin/auth/validate")
            .insert_header(("access_token", access))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_exams_require_a_token() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/exams").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
