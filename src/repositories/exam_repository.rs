use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    Collection,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Exam, ExamAccess, ExamFilter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Unchanged,
    NotFound,
}

#[async_trait]
pub trait ExamRepository: Send + Sync {
    async fn find(&self, filter: &ExamFilter) -> AppResult<Vec<Exam>>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Exam>>;
    async fn create(&self, exam: Exam) -> AppResult<Exam>;
    async fn update(&self, id: &ObjectId, exam: Exam) -> AppResult<UpdateOutcome>;
    /// Returns whether an exam was deleted.
    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;
}

pub struct MongoExamRepository {
    collection: Collection<Exam>,
}

impl MongoExamRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

fn filter_document(filter: &ExamFilter) -> Document {
    let mut query = Document::new();

    if let Some(name) = &filter.name {
        // Names are matched literally, never as a caller-supplied pattern
        query.insert(
            "name",
            doc! { "$regex": regex::escape(name), "$options": "i" },
        );
    }

    match filter.access {
        Some(ExamAccess::FreeAccess) => {
            query.insert("start", Bson::Null);
        }
        Some(ExamAccess::SpecificTime) => {
            query.insert("start", doc! { "$ne": Bson::Null });
        }
        None => {}
    }

    if let Some(ids) = &filter.ids {
        query.insert("_id", doc! { "$in": ids.clone() });
    }

    query
}

#[async_trait]
impl ExamRepository for MongoExamRepository {
    async fn find(&self, filter: &ExamFilter) -> AppResult<Vec<Exam>> {
        let cursor = self.collection.find(filter_document(filter)).await?;
        let exams: Vec<Exam> = cursor.try_collect().await?;
        Ok(exams)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Exam>> {
        let exam = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(exam)
    }

    async fn create(&self, mut exam: Exam) -> AppResult<Exam> {
        let result = self.collection.insert_one(&exam).await?;
        exam.id = Some(result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("Inserted exam has no ObjectId".to_string())
        })?);
        Ok(exam)
    }

    async fn update(&self, id: &ObjectId, mut exam: Exam) -> AppResult<UpdateOutcome> {
        exam.id = None;
        let fields = mongodb::bson::to_document(&exam)?;

        let result = self
            .collection
            .update_one(doc! { "_id": *id }, doc! { "$set": fields })
            .await?;

        Ok(match (result.matched_count, result.modified_count) {
            (0, _) => UpdateOutcome::NotFound,
            (_, 0) => UpdateOutcome::Unchanged,
            _ => UpdateOutcome::Updated,
        })
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_document_escapes_name() {
        let filter = ExamFilter {
            name: Some("C++ (basics)".to_string()),
            ..Default::default()
        };

        let query = filter_document(&filter);
        let name = query.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), r"C\+\+ \(basics\)");
        assert_eq!(name.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_filter_document_access() {
        let free = filter_document(&ExamFilter {
            access: Some(ExamAccess::FreeAccess),
            ..Default::default()
        });
        assert_eq!(free.get("start"), Some(&Bson::Null));

        let timed = filter_document(&ExamFilter {
            access: Some(ExamAccess::SpecificTime),
            ..Default::default()
        });
        assert!(timed.get_document("start").unwrap().contains_key("$ne"));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(filter_document(&ExamFilter::default()).is_empty());
    }
}
