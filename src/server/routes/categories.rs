use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::questions::get_questions_for_category,
    server::{app::AppState, error::ApiError, pagination::PageQuery},
};

use super::{category_map, ApiResponse, CategoryMap, QuestionsPage};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: CategoryMap,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesResponse> {
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(&pool).await?,
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<QuestionsPage> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    let query = PageQuery::or_default(query);
    let questions = get_questions_for_category(&pool, id).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let total = questions.len();
    let categories = category_map(&pool).await?;
    let mut page = QuestionsPage::build(questions, total, query.page(), categories)?;
    page.current_category = Some(id);
    Ok(Json(page))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
