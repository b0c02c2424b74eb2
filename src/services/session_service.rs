use std::sync::Arc;

use crate::{
    auth::{IdentityDirectory, IdentitySpace, JwtService},
    errors::{AppError, AppResult},
    models::{
        domain::Account,
        dto::{
            request::{LoginRequest, RegisterRequest},
            response::SessionPair,
        },
    },
    services::refresh_token_store::RefreshTokenStore,
    utils::validator::FieldValidators,
};

/// Issues access/refresh pairs for logins and registrations.
pub struct SessionService {
    jwt_service: Arc<JwtService>,
    refresh_tokens: Arc<RefreshTokenStore>,
    identities: IdentityDirectory,
    login_validators: FieldValidators,
    registration_validators: FieldValidators,
}

impl SessionService {
    pub fn new(
        jwt_service: Arc<JwtService>,
        refresh_tokens: Arc<RefreshTokenStore>,
        identities: IdentityDirectory,
    ) -> Self {
        Self {
            jwt_service,
            refresh_tokens,
            identities,
            login_validators: FieldValidators::login(),
            registration_validators: FieldValidators::registration(),
        }
    }

    pub async fn login(
        &self,
        space: IdentitySpace,
        request: LoginRequest,
    ) -> AppResult<SessionPair> {
        self.login_validators
            .validate(&[("email", request.email.as_str())])?;

        let account = self
            .identities
            .space(space)
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !account.password_matches(&request.password) {
            log::warn!("Rejected {:?} login for {}", space, request.email);
            return Err(AppError::InvalidCredentials);
        }

        let subject_id = account
            .subject_id()
            .ok_or_else(|| AppError::InternalError("Stored account has no id".to_string()))?;

        let pair = self.issue_session(&subject_id).await?;
        log::info!("Issued {:?} session for {}", space, subject_id);
        Ok(pair)
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<SessionPair> {
        self.registration_validators.validate(&request.fields())?;

        let users = self.identities.users();
        if users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let mut account = Account::new(&request.email, &request.password, Some(&request.full_name));
        account.date_of_birth = request.date_of_birth;

        let account = users.create(account).await?;
        let subject_id = account
            .subject_id()
            .ok_or_else(|| AppError::InternalError("Created account has no id".to_string()))?;

        let pair = self.issue_session(&subject_id).await?;
        log::info!("Registered user {}", subject_id);
        Ok(pair)
    }

    /// Mints a fresh pair for `subject_id` and records the refresh token.
    pub async fn issue_session(&self, subject_id: &str) -> AppResult<SessionPair> {
        let access_token = self.jwt_service.issue_access_token(subject_id)?;
        let refresh_token = self.jwt_service.issue_refresh_token(subject_id)?;

        self.refresh_tokens.put(subject_id, &refresh_token).await?;

        Ok(SessionPair {
            access_token,
            refresh_token,
        })
    }
}
