use axum::{extract::State, routing::post, Router};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_category, questions},
        Question,
    },
    server::{
        app::AppState,
        errors::{ApiError, ApiResponse, ResultExt},
        extractors::AppJson,
        quiz::pick_question,
        responses::{success, JsonSuccess},
    },
    telemetry::QUIZ_QUESTIONS_CNTR,
};

/// Category id standing for the whole question bank.
const ALL_CATEGORIES: i64 = 0;

/// Metric label for ids that name no stored category.
const UNKNOWN_CATEGORY: &str = "unknown";

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    quiz_category: Option<QuizCategory>,
    #[serde(default)]
    previous_questions: Option<Vec<i64>>,
}

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    id: Option<i64>,
}

#[derive(Serialize)]
struct NextQuestion {
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    AppJson(request): AppJson<QuizRequest>,
) -> ApiResponse<JsonSuccess<NextQuestion>> {
    let category_id = request
        .quiz_category
        .and_then(|c| c.id)
        .ok_or(ApiError::NotFound)?;
    let candidates = if category_id == ALL_CATEGORIES {
        questions::get_all_questions(&pool).await
    } else {
        questions::get_questions_for_category(&pool, category_id).await
    }
    .or_unprocessable()?;
    let label = category_label(&pool, category_id, !candidates.is_empty()).await?;

    let previous = request.previous_questions.unwrap_or_default();
    let mut rng = StdRng::from_entropy();
    let question = pick_question(candidates, &previous, &mut rng);

    let outcome = if question.is_some() {
        "served"
    } else {
        "exhausted"
    };
    QUIZ_QUESTIONS_CNTR
        .with_label_values(&[label.as_str(), outcome])
        .inc();

    Ok(success(NextQuestion { question }))
}

// client-supplied ids only become label values once they resolve to a stored category
async fn category_label(
    pool: &SqlitePool,
    category_id: i64,
    has_questions: bool,
) -> ApiResponse<String> {
    if category_id == ALL_CATEGORIES || has_questions {
        return Ok(category_id.to_string());
    }
    let known = get_category(pool, category_id)
        .await
        .or_unprocessable()?
        .is_some();
    Ok(if known {
        category_id.to_string()
    } else {
        UNKNOWN_CATEGORY.to_string()
    })
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
