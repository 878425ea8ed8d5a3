use std::collections::HashSet;

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use rand::{seq::IteratorRandom, Rng};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    server::{app::AppState, deserializers::LenientId, error::ApiError},
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<LenientId>,
    quiz_category: QuizCategory,
}

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    id: Option<LenientId>,
}

impl QuizCategory {
    // the frontend labels its "All" button with type "click"
    fn is_all(&self) -> bool {
        self.kind.eq_ignore_ascii_case("click") || self.kind.eq_ignore_ascii_case("all")
    }
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Question,
}

fn unseen(questions: Vec<Question>, previous: &HashSet<i64>) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect()
}

fn pick_question<R: Rng + ?Sized>(candidates: Vec<Question>, rng: &mut R) -> Option<Question> {
    candidates.into_iter().choose(rng)
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<QuizResponse> {
    let Json(request) = body.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    let unprocessable =
        |e: sqlx::Error| ApiError::Unprocessable(format!("quiz query failed: {e}"));

    let (candidates, label) = if request.quiz_category.is_all() {
        let all = questions::get_all_questions(&pool)
            .await
            .map_err(unprocessable)?;
        (all, "all".to_owned())
    } else {
        let Some(LenientId(category)) = request.quiz_category.id else {
            return Err(ApiError::Unprocessable("quiz category has no id".to_owned()));
        };
        let previous: HashSet<i64> =
            request.previous_questions.iter().map(|id| id.0).collect();
        let in_category = questions::get_questions_for_category(&pool, category)
            .await
            .map_err(unprocessable)?;
        (unseen(in_category, &previous), category.to_string())
    };

    let question = pick_question(candidates, &mut rand::thread_rng()).ok_or_else(|| {
        ApiError::Unprocessable(format!("no questions left to play in category {label}"))
    })?;

    QUIZ_QUESTIONS_SERVED.with_label_values(&[label.as_str()]).inc();
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
