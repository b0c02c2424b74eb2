use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use crate::models::domain::exam::Exam;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetail {
    pub question: String,
    pub your_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub exam_id: ObjectId,
    pub submitted_at: BsonDateTime,
    pub correct_count: u32,
    pub total_questions: u32,
    pub details: Vec<AnswerDetail>,
}

impl ExamResult {
    /// Grades `answers` positionally against the exam's questions.
    pub fn grade(exam: &Exam, exam_id: ObjectId, user_id: &str, answers: &[String]) -> Self {
        let details: Vec<AnswerDetail> = exam
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let your_answer = answers.get(index).cloned();
                let is_correct = your_answer.as_deref() == Some(question.correct_answer.as_str());

                AnswerDetail {
                    question: question.content.clone(),
                    your_answer,
                    correct_answer: question.correct_answer.clone(),
                    is_correct,
                }
            })
            .collect();

        let correct_count = details.iter().filter(|d| d.is_correct).count() as u32;

        ExamResult {
            id: None,
            user_id: user_id.to_string(),
            exam_id,
            submitted_at: BsonDateTime::now(),
            correct_count,
            total_questions: exam.questions.len() as u32,
            details,
        }
    }
}
