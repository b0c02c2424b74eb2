use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuestion {
    pub content: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Exam {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// Start time in epoch milliseconds; `None` for free-access exams.
    pub start: Option<i64>,
    /// Minutes.
    pub duration: i64,
    pub questions: Vec<ExamQuestion>,
}

/// Exam listing filter on the `start` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExamAccess {
    FreeAccess,
    SpecificTime,
}

impl ExamAccess {
    /// Parses the query-string labels used by clients. Unknown labels apply no filter.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Free access" => Some(ExamAccess::FreeAccess),
            "Specific time" => Some(ExamAccess::SpecificTime),
            _ => None,
        }
    }

    pub fn matches(&self, exam: &Exam) -> bool {
        match self {
            ExamAccess::FreeAccess => exam.start.is_none(),
            ExamAccess::SpecificTime => exam.start.is_some(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ExamFilter {
    pub name: Option<String>,
    pub access: Option<ExamAccess>,
    pub ids: Option<Vec<ObjectId>>,
}

impl ExamFilter {
    /// Evaluates the filter in memory, mirroring the store query.
    pub fn matches(&self, exam: &Exam) -> bool {
        let name_ok = self
            .name
            .as_ref()
            .map(|n| exam.name.to_lowercase().contains(&n.to_lowercase()))
            .unwrap_or(true);
        let access_ok = self.access.map(|a| a.matches(exam)).unwrap_or(true);
        let ids_ok = self
            .ids
            .as_ref()
            .map(|ids| exam.id.map(|id| ids.contains(&id)).unwrap_or(false))
            .unwrap_or(true);

        name_ok && access_ok && ids_ok
    }
}
