mod categories;
mod questions;
mod quizzes;

use axum::Json;
use serde::Serialize;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use crate::db::Question;

use super::error::ApiError;

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

/// `{success, id}` acknowledgement for writes.
#[derive(Serialize)]
pub struct Ack {
    success: bool,
    id: i64,
}

impl Ack {
    fn new(id: i64) -> Self {
        Ack { success: true, id }
    }
}

/// Filtered question listing, shared by search and per-category views.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionList {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
}

impl From<Vec<Question>> for QuestionList {
    fn from(questions: Vec<Question>) -> Self {
        QuestionList {
            success: true,
            total_questions: questions.len(),
            questions,
            current_category: None,
        }
    }
}
