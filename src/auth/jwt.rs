use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    config::Config,
    errors::{AppError, AppResult},
};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Signs and verifies the HS256 tokens handed out as access and refresh
/// credentials. Both kinds carry the same `{user: {_id}}` payload and differ
/// only in lifetime; refresh tokens are additionally tracked in the store.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl JwtService {
    pub fn new(
        secret: &SecretString,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation,
            access_token_ttl,
            refresh_token_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            Duration::minutes(config.access_token_minutes),
            Duration::days(config.refresh_token_days),
        )
    }

    pub fn issue(&self, subject_id: &str, ttl: Duration) -> AppResult<String> {
        let claims = Claims::new(subject_id, ttl);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }

    pub fn issue_access_token(&self, subject_id: &str) -> AppResult<String> {
        self.issue(subject_id, self.access_token_ttl)
    }

    pub fn issue_refresh_token(&self, subject_id: &str) -> AppResult<String> {
        self.issue(subject_id, self.refresh_token_ttl)
    }

    /// Returns the subject id of a correctly signed, unexpired token.
    /// A leading `Bearer ` is ignored.
    pub fn verify(&self, token: &str) -> AppResult<String> {
        let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token);

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::InvalidToken("jwt expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::InvalidToken("invalid signature".to_string())
                }
                _ => AppError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims.user.subject_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::from_config(&Config::test_config())
    }

    #[test]
    fn test_issue_and_verify() {
        let jwt_service = service();

        let token = jwt_service.issue_access_token("6619ef8ffc3384ad4a3ab95f").unwrap();
        assert!(!token.is_empty());

        let subject = jwt_service.verify(&token).unwrap();
        assert_eq!(subject, "6619ef8ffc3384ad4a3ab95f");
    }

    #[test]
    fn test_verify_strips_bearer_prefix() {
        let jwt_service = service();
        let token = jwt_service.issue_refresh_token("subject-1").unwrap();

        let subject = jwt_service.verify(&format!("Bearer {}", token)).unwrap();
        assert_eq!(subject, "subject-1");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt_service = service();
        let token = jwt_service.issue("subject-1", Duration::seconds(-5)).unwrap();

        match jwt_service.verify(&token) {
            Err(AppError::InvalidToken(msg)) => assert!(msg.contains("expired")),
            other => panic!("Expected InvalidToken, got {:?}", other),
        }
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = JwtService::new(
            &SecretString::from("another_secret".to_string()),
            Duration::minutes(15),
            Duration::days(30),
        );
        let token = other.issue_access_token("subject-1").unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let result = service().verify("invalid.token.here");
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_access_and_refresh_tokens_differ() {
        let jwt_service = service();

        let access = jwt_service.issue_access_token("subject-1").unwrap();
        let refresh = jwt_service.issue_refresh_token("subject-1").unwrap();
        assert_ne!(access, refresh);
    }
}
