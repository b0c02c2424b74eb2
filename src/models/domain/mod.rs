pub mod account;
pub mod exam;
pub mod exam_result;
pub mod refresh_token;
pub use account::Account;
pub use exam::{Exam, ExamAccess, ExamFilter, ExamQuestion};
pub use exam_result::ExamResult;
pub use refresh_token::RefreshToken;
