use crate::models::domain::{Account, Exam, ExamQuestion};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    /// A registered user with a known id and a strong password.
    pub fn test_account() -> Account {
        let mut account = Account::new("ann@example.com", "Abcd!234", Some("Ann"));
        account.id = Some(ObjectId::new());
        account
    }

    pub fn test_admin() -> Account {
        let mut admin = Account::new("root@example.com", "Root!234", Some("Root"));
        admin.id = Some(ObjectId::new());
        admin
    }

    pub fn test_exam(name: &str, start: Option<i64>) -> Exam {
        Exam {
            id: None,
            name: name.to_string(),
            start,
            duration: 60,
            questions: vec![
                ExamQuestion {
                    content: "2 + 2".to_string(),
                    options: vec!["3".to_string(), "4".to_string()],
                    correct_answer: "4".to_string(),
                },
                ExamQuestion {
                    content: "Capital of France?".to_string(),
                    options: vec!["Paris".to_string(), "Rome".to_string()],
                    correct_answer: "Paris".to_string(),
                },
            ],
        }
    }
}

/// In-memory repositories used by the service unit tests.
#[cfg(test)]
pub mod memory {
    use std::sync::Arc;

    use async_trait::async_trait;
    use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
    use tokio::sync::RwLock;

    use crate::{
        errors::{AppError, AppResult},
        models::domain::{Account, Exam, ExamFilter, ExamResult, RefreshToken},
        repositories::{
            ExamRepository, ExamResultRepository, IdentityRepository, RefreshTokenRepository,
            UpdateOutcome,
        },
    };

    #[derive(Default)]
    pub struct InMemoryIdentityRepository {
        accounts: Arc<RwLock<Vec<Account>>>,
    }

    impl InMemoryIdentityRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_accounts(accounts: Vec<Account>) -> Self {
            Self {
                accounts: Arc::new(RwLock::new(accounts)),
            }
        }

        pub async fn len(&self) -> usize {
            self.accounts.read().await.len()
        }
    }

    #[async_trait]
    impl IdentityRepository for InMemoryIdentityRepository {
        async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
            let accounts = self.accounts.read().await;
            Ok(accounts.iter().find(|a| a.email == email).cloned())
        }

        async fn find_by_id(&self, subject_id: &str) -> AppResult<Option<Account>> {
            let accounts = self.accounts.read().await;
            Ok(accounts
                .iter()
                .find(|a| a.subject_id().as_deref() == Some(subject_id))
                .cloned())
        }

        async fn create(&self, mut account: Account) -> AppResult<Account> {
            let mut accounts = self.accounts.write().await;
            if accounts.iter().any(|a| a.email == account.email) {
                return Err(AppError::DuplicateEmail);
            }
            account.id = Some(ObjectId::new());
            accounts.push(account.clone());
            Ok(account)
        }

        async fn ensure_indexes(&self) -> AppResult<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct InMemoryRefreshTokenRepository {
        tokens: Arc<RwLock<Vec<RefreshToken>>>,
    }

    impl InMemoryRefreshTokenRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn len(&self) -> usize {
            self.tokens.read().await.len()
        }
    }

    #[async_trait]
    impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
        async fn find_by_subject(&self, subject_id: &str) -> AppResult<Vec<RefreshToken>> {
            let tokens = self.tokens.read().await;
            Ok(tokens
                .iter()
                .filter(|t| t.user_id == subject_id)
                .cloned()
                .collect())
        }

        async fn insert(&self, token: RefreshToken) -> AppResult<RefreshToken> {
            self.tokens.write().await.push(token.clone());
            Ok(token)
        }

        async fn delete_by_subject(&self, subject_id: &str) -> AppResult<u64> {
            let mut tokens = self.tokens.write().await;
            let before = tokens.len();
            tokens.retain(|t| t.user_id != subject_id);
            Ok((before - tokens.len()) as u64)
        }

        async fn replace_token(&self, old_token: &str, new_token: &str) -> AppResult<bool> {
            let mut tokens = self.tokens.write().await;
            match tokens.iter_mut().find(|t| t.refresh_token == old_token) {
                Some(record) => {
                    record.refresh_token = new_token.to_string();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn ensure_indexes(&self) -> AppResult<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct InMemoryExamRepository {
        exams: Arc<RwLock<Vec<Exam>>>,
    }

    impl InMemoryExamRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl ExamRepository for InMemoryExamRepository {
        async fn find(&self, filter: &ExamFilter) -> AppResult<Vec<Exam>> {
            let exams = self.exams.read().await;
            Ok(exams.iter().filter(|e| filter.matches(e)).cloned().collect())
        }

        async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Exam>> {
            let exams = self.exams.read().await;
            Ok(exams.iter().find(|e| e.id.as_ref() == Some(id)).cloned())
        }

        async fn create(&self, mut exam: Exam) -> AppResult<Exam> {
            exam.id = Some(ObjectId::new());
            self.exams.write().await.push(exam.clone());
            Ok(exam)
        }

        async fn update(&self, id: &ObjectId, mut exam: Exam) -> AppResult<UpdateOutcome> {
            let mut exams = self.exams.write().await;
            let Some(existing) = exams.iter_mut().find(|e| e.id.as_ref() == Some(id)) else {
                return Ok(UpdateOutcome::NotFound);
            };

            exam.id = Some(*id);
            if *existing == exam {
                return Ok(UpdateOutcome::Unchanged);
            }
            *existing = exam;
            Ok(UpdateOutcome::Updated)
        }

        async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
            let mut exams = self.exams.write().await;
            let before = exams.len();
            exams.retain(|e| e.id.as_ref() != Some(id));
            Ok(exams.len() < before)
        }
    }

    #[derive(Default)]
    pub struct InMemoryExamResultRepository {
        results: Arc<RwLock<Vec<ExamResult>>>,
    }

    impl InMemoryExamResultRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl ExamResultRepository for InMemoryExamResultRepository {
        async fn create(&self, mut result: ExamResult) -> AppResult<ExamResult> {
            result.id = Some(ObjectId::new());
            self.results.write().await.push(result.clone());
            Ok(result)
        }

        async fn find_for_user(
            &self,
            user_id: &str,
            submitted_between: Option<(BsonDateTime, BsonDateTime)>,
        ) -> AppResult<Vec<ExamResult>> {
            let results = self.results.read().await;
            Ok(results
                .iter()
                .filter(|r| r.user_id == user_id)
                .filter(|r| {
                    submitted_between
                        .map(|(from, to)| r.submitted_at >= from && r.submitted_at < to)
                        .unwrap_or(true)
                })
                .cloned()
                .collect())
        }

        async fn ensure_indexes(&self) -> AppResult<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_have_ids() {
        assert!(test_account().subject_id().is_some());
        assert!(test_admin().subject_id().is_some());
        assert_ne!(test_account().id, test_admin().id);
    }

    #[test]
    fn test_fixture_exam_has_questions() {
        let exam = test_exam("Midterm", None);
        assert_eq!(exam.questions.len(), 2);
        assert!(exam.id.is_none());
    }
}
