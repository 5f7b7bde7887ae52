use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

use crate::db::{Category, Question};

/// Category id to display name, serialized as a JSON object keyed by id.
pub type CategoryMap = BTreeMap<i64, String>;

pub type JsonSuccess<T> = Json<Success<T>>;

#[derive(Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

pub fn success<T: Serialize>(body: T) -> JsonSuccess<T> {
    Json(Success {
        success: true,
        body,
    })
}

pub fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

#[derive(Serialize)]
pub struct QuestionList {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: Option<String>,
}

impl QuestionList {
    pub fn new(questions: Vec<Question>, current_category: Option<String>) -> Self {
        QuestionList {
            total_questions: questions.len() as i64,
            questions,
            current_category,
        }
    }
}
