use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, NewQuestion},
    server::{app::AppState, error::ApiError, pagination::PageQuery},
    telemetry::QUESTION_MUTATIONS,
};

use super::{category_map, ApiResponse, QuestionsPage};

// missing text fields are stored as empty strings, category and difficulty
// have no sensible default
#[derive(Deserialize)]
struct CreateQuestionBody {
    #[serde(default)]
    question: String,
    #[serde(default)]
    answer: String,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

impl TryFrom<CreateQuestionBody> for NewQuestion {
    type Error = ApiError;

    fn try_from(body: CreateQuestionBody) -> Result<Self, Self::Error> {
        let (Some(category), Some(difficulty)) = (body.category, body.difficulty) else {
            return Err(ApiError::MethodNotAllowed(
                "question needs a category and a difficulty".to_owned(),
            ));
        };
        Ok(NewQuestion {
            question: body.question,
            answer: body.answer,
            category,
            difficulty,
        })
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<QuestionsPage> {
    let query = PageQuery::or_default(query);
    let questions = questions::get_all_questions(&pool).await?;
    let total = questions.len();
    let categories = category_map(&pool).await?;
    let page = QuestionsPage::build(questions, total, query.page(), categories)?;
    Ok(Json(page))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<CreateQuestionBody>, JsonRejection>,
) -> ApiResponse<Created> {
    let Json(body) = body.map_err(|e| ApiError::MethodNotAllowed(e.body_text()))?;
    let new_question = NewQuestion::try_from(body)?;
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(|e| ApiError::MethodNotAllowed(format!("insert failed: {e}")))?;

    tracing::info!(id, category = new_question.category, "Question created");
    QUESTION_MUTATIONS.with_label_values(&["create"]).inc();
    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Deleted> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    let unprocessable =
        |e: sqlx::Error| ApiError::Unprocessable(format!("delete of {id} failed: {e}"));

    if questions::get_question_by_id(&pool, id)
        .await
        .map_err(unprocessable)?
        .is_none()
    {
        return Err(ApiError::NotFound);
    }
    // deleted concurrently between the lookup and here
    if questions::delete_question(&pool, id).await.map_err(unprocessable)? == 0 {
        return Err(ApiError::NotFound);
    }

    tracing::info!(id, "Question deleted");
    QUESTION_MUTATIONS.with_label_values(&["delete"]).inc();
    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<QuestionsPage> {
    let query = PageQuery::or_default(query);
    // an unreadable body finds nothing
    let Json(body) = body.map_err(|e| {
        tracing::warn!("Unreadable search body: {}", e.body_text());
        ApiError::NotFound
    })?;
    let term = body.search_term.unwrap_or_default();
    let found = questions::search_questions(&pool, &term).await?;
    tracing::debug!(term = %term, matches = found.len(), "Searched questions");
    if found.is_empty() {
        return Err(ApiError::NotFound);
    }
    let total = found.len();
    let categories = category_map(&pool).await?;
    let page = QuestionsPage::build(found, total, query.page(), categories)?;
    Ok(Json(page))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
