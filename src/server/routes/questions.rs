use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        Question, QuestionDraft,
    },
    server::{
        app::AppState,
        deserializers::deserialize_lenient_number,
        errors::{ApiError, ApiResponse, ResultExt},
        extractors::{AppJson, AppPath},
        pagination::{page_offset, QUESTIONS_PER_PAGE},
        responses::{category_map, success, CategoryMap, JsonSuccess, QuestionList},
    },
};

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    page: Option<i64>,
}

#[derive(Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
}

impl TryFrom<NewQuestion> for QuestionDraft {
    type Error = ApiError;

    fn try_from(value: NewQuestion) -> Result<Self, Self::Error> {
        Ok(QuestionDraft {
            question: required_text(value.question)?,
            answer: required_text(value.answer)?,
            category: value.category,
            difficulty: value.difficulty.ok_or(ApiError::BadRequest)?,
        })
    }
}

fn required_text(value: Option<String>) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ApiError::BadRequest)
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    questions: Vec<Question>,
    total_questions: i64,
    categories: CategoryMap,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct Created {
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<JsonSuccess<QuestionsPage>> {
    let offset = page_offset(query.page.unwrap_or(1)).ok_or(ApiError::NotFound)?;
    let page = questions::get_questions_page(&pool, QUESTIONS_PER_PAGE, offset)
        .await
        .or_not_found()?;
    if page.is_empty() {
        return Err(ApiError::NotFound);
    }
    let total_questions = questions::count_questions(&pool).await.or_not_found()?;
    let categories = get_all_categories(&pool).await.or_not_found()?;

    Ok(success(QuestionsPage {
        questions: page,
        total_questions,
        categories: category_map(categories),
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    AppJson(new_question): AppJson<NewQuestion>,
) -> ApiResponse<JsonSuccess<Created>> {
    let draft = QuestionDraft::try_from(new_question)?;
    let id = questions::create_question(&pool, &draft)
        .await
        .or_unprocessable()?;
    tracing::info!(id, "Created question");
    Ok(success(Created { created: id }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> ApiResponse<JsonSuccess<Deleted>> {
    if questions::get_question_by_id(&pool, id)
        .await
        .or_unprocessable()?
        .is_none()
    {
        return Err(ApiError::NotFound);
    }
    let deleted = questions::delete_question(&pool, id)
        .await
        .or_unprocessable()?;
    // removed by a concurrent request between lookup and delete
    if deleted == 0 {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id, "Deleted question");
    Ok(success(Deleted { deleted: id }))
}

async fn search(
    State(pool): State<SqlitePool>,
    AppJson(body): AppJson<SearchBody>,
) -> ApiResponse<JsonSuccess<QuestionList>> {
    let term = body.search_term.unwrap_or_default();
    if term.is_empty() {
        return Err(ApiError::EmptySearch);
    }
    let found = questions::search_questions(&pool, &term)
        .await
        .or_not_found()?;
    if found.is_empty() {
        return Err(ApiError::EmptySearch);
    }
    Ok(success(QuestionList::new(found, None)))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
