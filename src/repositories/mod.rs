pub mod exam_repository;
pub mod exam_result_repository;
pub mod identity_repository;
pub mod refresh_token_repository;

pub use exam_repository::{ExamRepository, MongoExamRepository, UpdateOutcome};
pub use exam_result_repository::{ExamResultRepository, MongoExamResultRepository};
pub use identity_repository::{IdentityRepository, MongoIdentityRepository};
pub use refresh_token_repository::{MongoRefreshTokenRepository, RefreshTokenRepository};
