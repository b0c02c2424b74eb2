pub mod exam_service;
pub mod refresh_token_store;
pub mod session_service;
pub mod token_refresh_service;

pub use exam_service::ExamService;
pub use refresh_token_store::RefreshTokenStore;
pub use session_service::SessionService;
pub use token_refresh_service::TokenRefreshService;
