use serde::Serialize;

use crate::models::domain::{
    exam::Exam,
    exam_result::{AnswerDetail, ExamResult},
};

/// The access/refresh pair returned by login, registration and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExamSummaryDto {
    pub id: String,
    pub name: String,
    pub start: Option<i64>,
    pub duration: i64,
}

impl From<&Exam> for ExamSummaryDto {
    fn from(exam: &Exam) -> Self {
        ExamSummaryDto {
            id: exam.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: exam.name.clone(),
            start: exam.start,
            duration: exam.duration,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExamListResponse {
    pub exams: Vec<ExamSummaryDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestionDto {
    pub content: String,
    pub options: Vec<String>,
}

/// An exam as shown to a candidate: correct answers are not included.
#[derive(Debug, Clone, Serialize)]
pub struct ExamDetailDto {
    pub id: String,
    pub name: String,
    pub start: Option<i64>,
    pub duration: i64,
    pub questions: Vec<PublicQuestionDto>,
}

impl From<Exam> for ExamDetailDto {
    fn from(exam: Exam) -> Self {
        ExamDetailDto {
            id: exam.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: exam.name,
            start: exam.start,
            duration: exam.duration,
            questions: exam
                .questions
                .into_iter()
                .map(|q| PublicQuestionDto {
                    content: q.content,
                    options: q.options,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDto {
    pub user_id: String,
    pub exam_id: String,
    /// Epoch milliseconds.
    pub submitted_at: i64,
    pub correct_count: u32,
    pub total_questions: u32,
    pub details: Vec<AnswerDetail>,
}

impl From<ExamResult> for SubmissionDto {
    fn from(result: ExamResult) -> Self {
        SubmissionDto {
            user_id: result.user_id,
            exam_id: result.exam_id.to_hex(),
            submitted_at: result.submitted_at.timestamp_millis(),
            correct_count: result.correct_count,
            total_questions: result.total_questions,
            details: result.details,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultScoreDto {
    pub submitted_at: i64,
    pub correct_count: u32,
    pub total_questions: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExamResultEntryDto {
    pub id: String,
    pub exam: ExamSummaryDto,
    pub result: ResultScoreDto,
}

impl ExamResultEntryDto {
    pub fn new(result: &ExamResult, exam: &Exam) -> Self {
        ExamResultEntryDto {
            id: result.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            exam: ExamSummaryDto::from(exam),
            result: ResultScoreDto {
                submitted_at: result.submitted_at.timestamp_millis(),
                correct_count: result.correct_count,
                total_questions: result.total_questions,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResultListResponse {
    pub exam_results: Vec<ExamResultEntryDto>,
}
