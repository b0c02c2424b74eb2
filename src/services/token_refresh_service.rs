use std::sync::Arc;

use crate::{
    auth::{jwt::BEARER_PREFIX, IdentityDirectory, IdentitySpace, JwtService},
    errors::{AppError, AppResult},
    models::dto::response::SessionPair,
    services::refresh_token_store::RefreshTokenStore,
};

/// Exchanges a stored refresh token for a new pair. Rotation is strict: the
/// presented token is overwritten by its replacement and cannot be used again.
pub struct TokenRefreshService {
    jwt_service: Arc<JwtService>,
    refresh_tokens: Arc<RefreshTokenStore>,
    identities: IdentityDirectory,
}

impl TokenRefreshService {
    pub fn new(
        jwt_service: Arc<JwtService>,
        refresh_tokens: Arc<RefreshTokenStore>,
        identities: IdentityDirectory,
    ) -> Self {
        Self {
            jwt_service,
            refresh_tokens,
            identities,
        }
    }

    pub async fn refresh(&self, token: &str, space: IdentitySpace) -> AppResult<SessionPair> {
        let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token);

        let subject_id = self.jwt_service.verify(token).map_err(|e| {
            log::warn!("Refresh rejected: {}", e);
            AppError::forbidden()
        })?;

        if self
            .identities
            .space(space)
            .find_by_id(&subject_id)
            .await?
            .is_none()
        {
            log::warn!("Refresh rejected: {} not found in {:?} space", subject_id, space);
            return Err(AppError::forbidden());
        }

        let stored = self.refresh_tokens.find_all(&subject_id).await?;
        if stored.is_empty() {
            return Err(AppError::NoRefreshToken);
        }
        if !stored.iter().any(|t| t == token) {
            log::warn!("Refresh rejected: stale token presented for {}", subject_id);
            return Err(AppError::InvalidRefreshToken);
        }

        let access_token = self.jwt_service.issue_access_token(&subject_id)?;
        let refresh_token = self.jwt_service.issue_refresh_token(&subject_id)?;
        self.refresh_tokens.replace(token, &refresh_token).await?;

        log::info!("Rotated refresh token for {}", subject_id);
        Ok(SessionPair {
            access_token,
            refresh_token,
        })
    }
}
