use std::fmt::Display;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::responses::QuestionList;

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("unprocessable")]
    Unprocessable,
    /// A search that matched nothing. Rendered as not found, with the empty result attached.
    #[error("resource not found")]
    EmptySearch,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::EmptySearch => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
    #[serde(flatten)]
    result: Option<QuestionList>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let result = match self {
            ApiError::EmptySearch => Some(QuestionList {
                questions: vec![],
                total_questions: 0,
                current_category: None,
            }),
            _ => None,
        };
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
            result,
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path: {}", rejection.body_text());
        ApiError::NotFound
    }
}

/// Collapses storage errors into one of the public error codes, logging the cause.
pub trait ResultExt<T> {
    fn or_not_found(self) -> ApiResponse<T>;
    fn or_unprocessable(self) -> ApiResponse<T>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_not_found(self) -> ApiResponse<T> {
        self.map_err(|e| {
            tracing::error!("Read failed: {e}");
            ApiError::NotFound
        })
    }

    fn or_unprocessable(self) -> ApiResponse<T> {
        self.map_err(|e| {
            tracing::error!("Write failed: {e}");
            ApiError::Unprocessable
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn render(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn error_bodies_are_uniform() {
        let (status, body) = render(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"success": false, "error": 404, "message": "resource not found"})
        );

        let (status, body) = render(ApiError::Unprocessable).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({"success": false, "error": 422, "message": "unprocessable"})
        );

        let (status, body) = render(ApiError::BadRequest).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"success": false, "error": 400, "message": "bad request"})
        );
    }

    #[tokio::test]
    async fn empty_search_carries_empty_result() {
        let (status, body) = render(ApiError::EmptySearch).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], 404);
        assert_eq!(body["total_questions"], 0);
        assert_eq!(body["questions"], json!([]));
        assert_eq!(body["current_category"], Value::Null);
    }

    #[test]
    fn storage_errors_are_collapsed() {
        let failed: Result<(), sqlx::Error> = Err(sqlx::Error::PoolTimedOut);
        assert!(matches!(failed.or_not_found(), Err(ApiError::NotFound)));
        let failed: Result<(), sqlx::Error> = Err(sqlx::Error::PoolTimedOut);
        assert!(matches!(
            failed.or_unprocessable(),
            Err(ApiError::Unprocessable)
        ));
    }
}
