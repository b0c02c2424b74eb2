use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The resolved identity of an authenticated caller. Serializes as `{"_id": ...}`,
/// which is both the token payload and the body returned by the validate routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "_id")]
    pub subject_id: String,
}

impl Identity {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user: Identity,
    pub jti: String, // Unique per token
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(subject_id: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        let exp = now + ttl;

        Self {
            user: Identity::new(subject_id),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp().max(0) as usize,
            exp: exp.timestamp().max(0) as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new("6619ef8ffc3384ad4a3ab95f", Duration::minutes(150));

        assert_eq!(claims.user.subject_id, "6619ef8ffc3384ad4a3ab95f");
        assert_eq!(claims.exp - claims.iat, 150 * 60);
    }

    #[test]
    fn test_claims_wire_format() {
        let claims = Claims::new("abc", Duration::days(30));
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["user"]["_id"], "abc");
        assert!(json["exp"].is_number());
    }

    #[test]
    fn test_claims_are_unique_per_issue() {
        let first = Claims::new("abc", Duration::days(30));
        let second = Claims::new("abc", Duration::days(30));

        assert_ne!(first.jti, second.jti);
    }
}
