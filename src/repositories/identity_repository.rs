use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Account,
};

const DUPLICATE_KEY_CODE: i32 = 11000;

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE
    )
}

/// Lookup and creation of accounts in one identity collection. The user and
/// admin collections are two instances of the same repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;
    async fn find_by_id(&self, subject_id: &str) -> AppResult<Option<Account>>;
    /// Inserts the account and returns it with its generated id. An email
    /// already present fails with `DuplicateEmail`.
    async fn create(&self, account: Account) -> AppResult<Account>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoIdentityRepository {
    collection: Collection<Account>,
    collection_name: String,
}

impl MongoIdentityRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self {
            collection,
            collection_name: collection_name.to_string(),
        }
    }
}

#[async_trait]
impl IdentityRepository for MongoIdentityRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let account = self.collection.find_one(doc! { "email": email }).await?;
        Ok(account)
    }

    async fn find_by_id(&self, subject_id: &str) -> AppResult<Option<Account>> {
        // A subject that is not a valid ObjectId cannot name any account
        let Ok(oid) = ObjectId::parse_str(subject_id) else {
            return Ok(None);
        };

        let account = self.collection.find_one(doc! { "_id": oid }).await?;
        Ok(account)
    }

    async fn create(&self, mut account: Account) -> AppResult<Account> {
        let result = match self.collection.insert_one(&account).await {
            Ok(result) => result,
            // Lost a race with a concurrent registration for the same email
            Err(e) if is_duplicate_key(&e) => return Err(AppError::DuplicateEmail),
            Err(e) => return Err(e.into()),
        };

        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("Inserted account has no ObjectId".to_string())
        })?;
        account.id = Some(oid);

        Ok(account)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created unique index on {}.email", self.collection_name);

        Ok(())
    }
}
