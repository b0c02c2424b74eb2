pub mod admin_auth_handler;
pub mod admin_exam_handler;
pub mod auth_handler;
pub mod exam_handler;
pub mod health_handler;
