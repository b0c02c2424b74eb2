use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::RefreshToken,
    repositories::RefreshTokenRepository,
};

/// Server-side record of issued refresh tokens with a per-subject cap.
///
/// When a subject already holds `cap` tokens, storing another one clears the
/// whole cohort first ("clear-then-add"); it is not an LRU eviction. The check
/// and the writes are separate store calls, so concurrent logins for one
/// subject may briefly exceed the cap.
pub struct RefreshTokenStore {
    repository: Arc<dyn RefreshTokenRepository>,
    cap: usize,
}

impl RefreshTokenStore {
    pub fn new(repository: Arc<dyn RefreshTokenRepository>, cap: usize) -> Self {
        Self {
            repository,
            cap: cap.max(1),
        }
    }

    pub async fn put(&self, subject_id: &str, token: &str) -> AppResult<()> {
        let existing = self.repository.find_by_subject(subject_id).await?;

        if existing.len() >= self.cap {
            let removed = self.repository.delete_by_subject(subject_id).await?;
            log::debug!(
                "Refresh token cap of {} reached for {}, cleared {} tokens",
                self.cap,
                subject_id,
                removed
            );
        }

        self.repository
            .insert(RefreshToken::new(subject_id, token))
            .await?;
        Ok(())
    }

    pub async fn find_all(&self, subject_id: &str) -> AppResult<Vec<String>> {
        let tokens = self.repository.find_by_subject(subject_id).await?;
        Ok(tokens.into_iter().map(|t| t.refresh_token).collect())
    }

    /// Swaps `old_token` for `new_token` in place. Fails with
    /// `InvalidRefreshToken` when `old_token` is no longer stored, e.g. because
    /// a concurrent refresh rotated it first.
    pub async fn replace(&self, old_token: &str, new_token: &str) -> AppResult<()> {
        if self.repository.replace_token(old_token, new_token).await? {
            Ok(())
        } else {
            Err(AppError::InvalidRefreshToken)
        }
    }
}
