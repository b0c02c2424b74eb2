use async_trait::async_trait;
use futures::TryStreamExt;
use log::info;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::RefreshToken};

/// Raw document operations on the refresh token collection. The per-subject
/// cap is enforced above this layer by `RefreshTokenStore`.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn find_by_subject(&self, subject_id: &str) -> AppResult<Vec<RefreshToken>>;
    async fn insert(&self, token: RefreshToken) -> AppResult<RefreshToken>;
    async fn delete_by_subject(&self, subject_id: &str) -> AppResult<u64>;
    /// Rewrites the record holding `old_token` in a single update. Returns
    /// whether a record matched.
    async fn replace_token(&self, old_token: &str, new_token: &str) -> AppResult<bool>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoRefreshTokenRepository {
    collection: Collection<RefreshToken>,
}

impl MongoRefreshTokenRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl RefreshTokenRepository for MongoRefreshTokenRepository {
    async fn find_by_subject(&self, subject_id: &str) -> AppResult<Vec<RefreshToken>> {
        let cursor = self.collection.find(doc! { "userId": subject_id }).await?;
        let tokens: Vec<RefreshToken> = cursor.try_collect().await?;
        Ok(tokens)
    }

    async fn insert(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        self.collection.insert_one(&token).await?;
        Ok(token)
    }

    async fn delete_by_subject(&self, subject_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "userId": subject_id })
            .await?;

        Ok(result.deleted_count)
    }

    async fn replace_token(&self, old_token: &str, new_token: &str) -> AppResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "refreshToken": old_token },
                doc! { "$set": { "refreshToken": new_token } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let token_options = IndexOptions::builder().unique(true).build();
        let token_model = IndexModel::builder()
            .keys(doc! { "refreshToken": 1 })
            .options(token_options)
            .build();
        self.collection.create_index(token_model).await?;
        info!("Created unique index on refreshTokens.refreshToken");

        let user_id_model = IndexModel::builder()
            .keys(doc! { "userId": 1 })
            .build();
        self.collection.create_index(user_id_model).await?;
        info!("Created index on refreshTokens.userId");

        Ok(())
    }
}
