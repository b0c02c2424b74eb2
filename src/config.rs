use std::env;
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub mongo_max_pool_size: u32,
    pub mongo_min_pool_size: u32,
    pub mongo_timeout_secs: u64,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    pub refresh_token_cap: usize,
    pub users_collection: String,
    pub admin_collection: String,
    pub refresh_tokens_collection: String,
    pub exams_collection: String,
    pub exam_results_collection: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_var_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app_env: var_or("APP_ENV", "development"),
            mongo_conn_string: var_or("MONGO_CONN_STRING", "mongodb://localhost:27017"),
            mongo_db_name: var_or("MONGO_DB_NAME", "exam-server-local"),
            mongo_max_pool_size: parsed_var_or("MONGO_MAX_POOL_SIZE", 10),
            mongo_min_pool_size: parsed_var_or("MONGO_MIN_POOL_SIZE", 2),
            mongo_timeout_secs: parsed_var_or("MONGO_TIMEOUT_SECS", 5),
            web_server_host: var_or("WEB_SERVER_HOST", "localhost"),
            web_server_port: parsed_var_or("WEB_SERVER_PORT", 8080),
            jwt_secret: SecretString::from(var_or("JWT_SECRET", DEFAULT_JWT_SECRET)),
            access_token_minutes: parsed_var_or("ACCESS_TOKEN_MINUTES", 150),
            refresh_token_days: parsed_var_or("REFRESH_TOKEN_DAYS", 30),
            refresh_token_cap: parsed_var_or("REFRESH_TOKEN_CAP", 5),
            users_collection: var_or("USERS_COLLECTION", "users"),
            admin_collection: var_or("ADMIN_COLLECTION", "admin"),
            refresh_tokens_collection: var_or("REFRESH_TOKENS_COLLECTION", "refreshTokens"),
            exams_collection: var_or("EXAMS_COLLECTION", "exams"),
            exam_results_collection: var_or("EXAM_RESULTS_COLLECTION", "exam_results"),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects configuration that must never reach a production deployment.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the default value, set it to a secure random string"
                    .to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}), it must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        if self.refresh_token_cap == 0 {
            return Err(AppError::InternalError(
                "REFRESH_TOKEN_CAP must be at least 1".to_string(),
            ));
        }

        if self.mongo_max_pool_size == 0 || self.mongo_min_pool_size > self.mongo_max_pool_size {
            return Err(AppError::InternalError(format!(
                "MONGO_MIN_POOL_SIZE ({}) must not exceed a non-zero MONGO_MAX_POOL_SIZE ({})",
                self.mongo_min_pool_size, self.mongo_max_pool_size
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "exam-server-test".to_string(),
            mongo_max_pool_size: 10,
            mongo_min_pool_size: 2,
            mongo_timeout_secs: 5,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            access_token_minutes: 150,
            refresh_token_days: 30,
            refresh_token_cap: 5,
            users_collection: "users".to_string(),
            admin_collection: "admin".to_string(),
            refresh_tokens_collection: "refreshTokens".to_string(),
            exams_collection: "exams".to_string(),
            exam_results_collection: "exam_results".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(config.refresh_token_days > 0);
        assert!(config.mongo_max_pool_size >= config.mongo_min_pool_size);
        assert!(config.mongo_timeout_secs > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.users_collection, "users");
        assert_eq!(config.admin_collection, "admin");
        assert_eq!(config.refresh_tokens_collection, "refreshTokens");
        assert_eq!(config.refresh_token_cap, 5);
        assert!(!config.is_production());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let mut config = Config::test_config();
        config.jwt_secret = SecretString::from(DEFAULT_JWT_SECRET.to_string());

        assert!(config.validate_for_production().is_err());
    }

    #[test]
    fn test_production_rejects_short_secret() {
        let config = Config::test_config();

        let err = config.validate_for_production().unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_production_accepts_long_secret() {
        let mut config = Config::test_config();
        config.jwt_secret = SecretString::from("x".repeat(48));

        assert!(config.validate_for_production().is_ok());
    }

    #[test]
    fn test_production_rejects_inverted_pool_bounds() {
        let mut config = Config::test_config();
        config.jwt_secret = SecretString::from("x".repeat(48));
        config.mongo_min_pool_size = 20;

        let err = config.validate_for_production().unwrap_err();
        assert!(err.to_string().contains("MONGO_MIN_POOL_SIZE"));
    }
}
