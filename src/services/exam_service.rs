use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Exam, ExamAccess, ExamFilter, ExamResult},
        dto::{
            request::{ExamListQuery, ExamRequest, ExamResultQuery, SubmitExamRequest},
            response::{
                ExamDetailDto, ExamListResponse, ExamResultEntryDto, ExamResultListResponse,
                ExamSummaryDto, SubmissionDto,
            },
        },
    },
    repositories::{ExamRepository, ExamResultRepository, UpdateOutcome},
};

const EXAM_NOT_FOUND: &str = "Exam not found";

pub struct ExamService {
    exams: Arc<dyn ExamRepository>,
    results: Arc<dyn ExamResultRepository>,
}

impl ExamService {
    pub fn new(exams: Arc<dyn ExamRepository>, results: Arc<dyn ExamResultRepository>) -> Self {
        Self { exams, results }
    }

    pub async fn list_exams(&self, query: ExamListQuery) -> AppResult<ExamListResponse> {
        let filter = ExamFilter {
            name: query.name,
            access: query.exam_type.as_deref().and_then(ExamAccess::from_label),
            ids: None,
        };

        let exams = self.exams.find(&filter).await?;
        Ok(ExamListResponse {
            exams: exams.iter().map(ExamSummaryDto::from).collect(),
        })
    }

    pub async fn get_exam(&self, exam_id: &str) -> AppResult<ExamDetailDto> {
        let exam = self.load_exam(exam_id).await?;
        Ok(ExamDetailDto::from(exam))
    }

    pub async fn submit_exam(
        &self,
        exam_id: &str,
        subject_id: &str,
        submission: SubmitExamRequest,
    ) -> AppResult<SubmissionDto> {
        let id = parse_exam_id(exam_id)?;
        let exam = self
            .exams
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(EXAM_NOT_FOUND.to_string()))?;

        let graded = ExamResult::grade(&exam, id, subject_id, &submission.answers);
        let stored = self.results.create(graded).await?;

        log::info!(
            "User {} scored {}/{} on exam {}",
            subject_id,
            stored.correct_count,
            stored.total_questions,
            exam_id
        );
        Ok(SubmissionDto::from(stored))
    }

    /// Results of `subject_id` joined with their exams. Results whose exam no
    /// longer exists or is excluded by the filter are left out.
    pub async fn list_results(
        &self,
        subject_id: &str,
        query: ExamResultQuery,
    ) -> AppResult<ExamResultListResponse> {
        let window = submission_window(
            query.submitted_at_from.as_deref(),
            query.submitted_at_to.as_deref(),
        )?;

        let results = self.results.find_for_user(subject_id, window).await?;
        if results.is_empty() {
            return Ok(ExamResultListResponse {
                exam_results: Vec::new(),
            });
        }

        let mut ids: Vec<ObjectId> = results.iter().map(|r| r.exam_id).collect();
        ids.sort();
        ids.dedup();

        let filter = ExamFilter {
            name: query.name,
            access: query.exam_type.as_deref().and_then(ExamAccess::from_label),
            ids: Some(ids),
        };
        let exams: HashMap<ObjectId, Exam> = self
            .exams
            .find(&filter)
            .await?
            .into_iter()
            .filter_map(|exam| exam.id.map(|id| (id, exam)))
            .collect();

        let exam_results = results
            .iter()
            .filter_map(|result| {
                exams
                    .get(&result.exam_id)
                    .map(|exam| ExamResultEntryDto::new(result, exam))
            })
            .collect();

        Ok(ExamResultListResponse { exam_results })
    }

    pub async fn create_exam(&self, request: ExamRequest) -> AppResult<ExamSummaryDto> {
        let exam = exam_from_request(request)?;
        let created = self.exams.create(exam).await?;

        log::info!("Created exam {:?}", created.id);
        Ok(ExamSummaryDto::from(&created))
    }

    pub async fn update_exam(
        &self,
        exam_id: &str,
        request: ExamRequest,
    ) -> AppResult<UpdateOutcome> {
        let id = parse_exam_id(exam_id)?;
        let exam = exam_from_request(request)?;

        match self.exams.update(&id, exam).await? {
            UpdateOutcome::NotFound => Err(AppError::NotFound(EXAM_NOT_FOUND.to_string())),
            outcome => Ok(outcome),
        }
    }

    pub async fn delete_exam(&self, exam_id: &str) -> AppResult<()> {
        let id = parse_exam_id(exam_id)?;

        if self.exams.delete(&id).await? {
            log::info!("Deleted exam {}", exam_id);
            Ok(())
        } else {
            Err(AppError::NotFound(EXAM_NOT_FOUND.to_string()))
        }
    }

    async fn load_exam(&self, exam_id: &str) -> AppResult<Exam> {
        let id = parse_exam_id(exam_id)?;
        self.exams
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(EXAM_NOT_FOUND.to_string()))
    }
}

// Malformed ids can never match a stored exam.
fn parse_exam_id(exam_id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(exam_id).map_err(|_| AppError::NotFound(EXAM_NOT_FOUND.to_string()))
}

fn exam_from_request(request: ExamRequest) -> AppResult<Exam> {
    let name = request
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::ValidationError("Exam name is required".to_string()))?;
    let duration = request
        .duration
        .filter(|d| *d > 0)
        .ok_or_else(|| AppError::ValidationError("Exam duration is required".to_string()))?;
    let questions = request.questions.unwrap_or_default();
    if questions.is_empty() {
        return Err(AppError::ValidationError(
            "Exam should have at least one question".to_string(),
        ));
    }

    Ok(Exam {
        id: None,
        name,
        start: request.start,
        duration,
        questions,
    })
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` read as midnight UTC.
fn parse_timestamp(field: &str, value: &str) -> AppResult<BsonDateTime> {
    let millis = chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp_millis())
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|midnight| midnight.and_utc().timestamp_millis())
        })
        .ok_or_else(|| AppError::ValidationError(format!("Please enter valid {}!", field)))?;

    Ok(BsonDateTime::from_millis(millis))
}

/// `[from, to)` window for result lookups. A missing bound is left open.
fn submission_window(
    from: Option<&str>,
    to: Option<&str>,
) -> AppResult<Option<(BsonDateTime, BsonDateTime)>> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }

    let from = match from {
        Some(value) => parse_timestamp("submittedAtFrom", value)?,
        None => BsonDateTime::MIN,
    };
    let to = match to {
        Some(value) => parse_timestamp("submittedAtTo", value)?,
        None => BsonDateTime::MAX,
    };
    Ok(Some((from, to)))
}
