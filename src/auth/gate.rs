use crate::{
    auth::{claims::Identity, identity::IdentityDirectory, jwt::JwtService},
    errors::{AppError, AppResult},
};

/// User gate: resolves the caller from an access token without touching the store.
pub fn authorize(jwt_service: &JwtService, token: Option<&str>) -> AppResult<Identity> {
    let token = token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Unauthorized("Token is invalid".to_string()))?;

    let subject_id = jwt_service
        .verify(token)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    Ok(Identity::new(subject_id))
}

/// Admin gate: the identity resolved by the user gate must exist in the admin
/// collection. Lookup failures are reported as forbidden too.
pub async fn require_admin(directory: &IdentityDirectory, identity: &Identity) -> AppResult<()> {
    match directory.admins().find_by_id(&identity.subject_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => {
            log::warn!("Subject {} is not an administrator", identity.subject_id);
            Err(AppError::forbidden())
        }
        Err(e) => {
            log::warn!("Admin lookup for {} failed: {}", identity.subject_id, e);
            Err(AppError::forbidden())
        }
    }
}
