use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime as BsonDateTime},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::ExamResult,
};

#[async_trait]
pub trait ExamResultRepository: Send + Sync {
    async fn create(&self, result: ExamResult) -> AppResult<ExamResult>;
    /// Results of one user, optionally restricted to `from <= submittedAt < to`.
    async fn find_for_user(
        &self,
        user_id: &str,
        submitted_between: Option<(BsonDateTime, BsonDateTime)>,
    ) -> AppResult<Vec<ExamResult>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoExamResultRepository {
    collection: Collection<ExamResult>,
}

impl MongoExamResultRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl ExamResultRepository for MongoExamResultRepository {
    async fn create(&self, mut result: ExamResult) -> AppResult<ExamResult> {
        let inserted = self.collection.insert_one(&result).await?;
        result.id = inserted.inserted_id.as_object_id();
        Ok(result)
    }

    async fn find_for_user(
        &self,
        user_id: &str,
        submitted_between: Option<(BsonDateTime, BsonDateTime)>,
    ) -> AppResult<Vec<ExamResult>> {
        let mut filter = doc! { "userId": user_id };
        if let Some((from, to)) = submitted_between {
            filter.insert("submittedAt", doc! { "$gte": from, "$lt": to });
        }

        let cursor = self.collection.find(filter).await?;
        let results: Vec<ExamResult> = cursor.try_collect().await?;
        Ok(results)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(doc! { "userId": 1, "submittedAt": -1 })
            .options(IndexOptions::builder().name("user_submitted".to_string()).build())
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created index on exam_results.userId");

        Ok(())
    }
}
