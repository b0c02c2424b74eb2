use serde::Deserialize;

use crate::models::domain::exam::ExamQuestion;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
}

impl RegisterRequest {
    /// The submitted fields keyed by their wire names, in validation order.
    /// Absent optional fields are left out so they are never validated.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("fullName", self.full_name.as_str()),
        ];
        if let Some(date_of_birth) = &self.date_of_birth {
            fields.push(("dateOfBirth", date_of_birth.as_str()));
        }
        fields
    }
}

/// Body of the admin create/update exam routes. Every field is optional on the
/// wire so missing ones can be reported with a specific message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamRequest {
    pub name: Option<String>,
    pub duration: Option<i64>,
    #[serde(default)]
    pub start: Option<i64>,
    pub questions: Option<Vec<ExamQuestion>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitExamRequest {
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamListQuery {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub exam_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResultQuery {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub exam_type: Option<String>,
    pub submitted_at_from: Option<String>,
    pub submitted_at_to: Option<String>,
}
