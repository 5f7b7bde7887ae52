use axum::{extract::State, routing::get, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::{
        categories::{get_all_categories, get_category},
        questions::get_questions_for_category,
    },
    server::{
        app::AppState,
        errors::{ApiError, ApiResponse, ResultExt},
        extractors::AppPath,
        responses::{category_map, success, CategoryMap, JsonSuccess, QuestionList},
    },
};

#[derive(Serialize)]
struct CategoriesBody {
    categories: CategoryMap,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<JsonSuccess<CategoriesBody>> {
    let categories = get_all_categories(&pool).await.or_not_found()?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(success(CategoriesBody {
        categories: category_map(categories),
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> ApiResponse<JsonSuccess<QuestionList>> {
    let category = get_category(&pool, id)
        .await
        .or_not_found()?
        .ok_or(ApiError::NotFound)?;
    let questions = get_questions_for_category(&pool, id).await.or_not_found()?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(success(QuestionList::new(questions, Some(category.kind))))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
