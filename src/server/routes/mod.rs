mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;
use sqlx::SqlitePool;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

use crate::db::{queries::categories::get_all_categories, Question};
use crate::server::error::ApiError;
use crate::server::pagination::paginate;

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

/// Category id to its type label, serialized as a JSON object.
pub type CategoryMap = BTreeMap<i64, String>;

async fn category_map(pool: &SqlitePool) -> sqlx::Result<CategoryMap> {
    Ok(get_all_categories(pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect())
}

#[derive(Debug, Serialize)]
pub struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: CategoryMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_category: Option<i64>,
}

impl QuestionsPage {
    /// Cuts `page` out of `questions`, an empty page is a 404.
    fn build(
        questions: Vec<Question>,
        total_questions: usize,
        page: i64,
        categories: CategoryMap,
    ) -> Result<Self, ApiError> {
        let questions = paginate(questions, page);
        if questions.is_empty() {
            return Err(ApiError::NotFound);
        }
        Ok(QuestionsPage {
            success: true,
            questions,
            total_questions,
            categories,
            current_category: None,
        })
    }
}
