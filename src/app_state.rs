use std::sync::Arc;

use crate::{
    auth::{IdentityDirectory, JwtService},
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        ExamRepository, ExamResultRepository, IdentityRepository, MongoExamRepository,
        MongoExamResultRepository, MongoIdentityRepository, MongoRefreshTokenRepository,
        RefreshTokenRepository,
    },
    services::{ExamService, RefreshTokenStore, SessionService, TokenRefreshService},
};

/// Storage backends the services are built on.
pub struct Repositories {
    pub users: Arc<dyn IdentityRepository>,
    pub admins: Arc<dyn IdentityRepository>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    pub exams: Arc<dyn ExamRepository>,
    pub exam_results: Arc<dyn ExamResultRepository>,
}

impl Repositories {
    pub async fn mongo(db: &Database, config: &Config) -> AppResult<Self> {
        let users = Arc::new(MongoIdentityRepository::new(db, &config.users_collection));
        users.ensure_indexes().await?;

        let admins = Arc::new(MongoIdentityRepository::new(db, &config.admin_collection));
        admins.ensure_indexes().await?;

        let refresh_tokens = Arc::new(MongoRefreshTokenRepository::new(
            db,
            &config.refresh_tokens_collection,
        ));
        refresh_tokens.ensure_indexes().await?;

        let exam_results = Arc::new(MongoExamResultRepository::new(
            db,
            &config.exam_results_collection,
        ));
        exam_results.ensure_indexes().await?;

        Ok(Self {
            users,
            admins,
            refresh_tokens,
            exams: Arc::new(MongoExamRepository::new(db, &config.exams_collection)),
            exam_results,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub jwt_service: Arc<JwtService>,
    pub identities: IdentityDirectory,
    pub session_service: Arc<SessionService>,
    pub refresh_service: Arc<TokenRefreshService>,
    pub exam_service: Arc<ExamService>,
    pub config: Arc<Config>,
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(db: Database, config: Config) -> AppResult<Self> {
        let repositories = Repositories::mongo(&db, &config).await?;

        let mut state = Self::from_repositories(config, repositories);
        state.db = Some(db);
        Ok(state)
    }

    /// Wires the services over arbitrary repositories, without a database
    /// handle.
    pub fn from_repositories(config: Config, repositories: Repositories) -> Self {
        let jwt_service = Arc::new(JwtService::from_config(&config));
        let identities = IdentityDirectory::new(repositories.users, repositories.admins);
        let store = Arc::new(RefreshTokenStore::new(
            repositories.refresh_tokens,
            config.refresh_token_cap,
        ));

        Self {
            session_service: Arc::new(SessionService::new(
                jwt_service.clone(),
                store.clone(),
                identities.clone(),
            )),
            refresh_service: Arc::new(TokenRefreshService::new(
                jwt_service.clone(),
                store,
                identities.clone(),
            )),
            exam_service: Arc::new(ExamService::new(
                repositories.exams,
                repositories.exam_results,
            )),
            jwt_service,
            identities,
            config: Arc::new(config),
            db: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::memory::{
        InMemoryExamRepository, InMemoryExamResultRepository, InMemoryIdentityRepository,
        InMemoryRefreshTokenRepository,
    };

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_from_repositories_has_no_database() {
        let state = AppState::from_repositories(
            Config::test_config(),
            Repositories {
                users: Arc::new(InMemoryIdentityRepository::new()),
                admins: Arc::new(InMemoryIdentityRepository::new()),
                refresh_tokens: Arc::new(InMemoryRefreshTokenRepository::new()),
                exams: Arc::new(InMemoryExamRepository::new()),
                exam_results: Arc::new(InMemoryExamResultRepository::new()),
            },
        );

        assert!(state.db.is_none());
        assert_eq!(state.config.refresh_token_cap, 5);
    }
}
