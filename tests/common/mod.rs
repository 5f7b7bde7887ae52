#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;
use trivia_api::{
    db::{
        self,
        queries::{categories::create_category, questions::create_question},
        QuestionDraft,
    },
    server::app::{router, AppState},
};

pub struct TestApp {
    pub pool: SqlitePool,
    router: Router,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("trivia_test.db");
        let pool = db::establish_connection(&path.display().to_string())
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");
        let router = router(AppState { pool: pool.clone() });
        TestApp {
            pool,
            router,
            _dir: dir,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(req)
            .await
            .expect("router should respond")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let body = match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        };
        let resp = self
            .send(req.body(body).expect("request build should succeed"))
            .await;
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be json")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    pub async fn add_category(&self, kind: &str) -> i64 {
        create_category(&self.pool, kind)
            .await
            .expect("create category")
    }

    pub async fn add_question(&self, question: &str, category: Option<i64>) -> i64 {
        create_question(
            &self.pool,
            &QuestionDraft {
                question: question.to_string(),
                answer: format!("Answer to {question}"),
                category,
                difficulty: 2,
            },
        )
        .await
        .expect("create question")
    }

    /// Seeds `n` numbered questions into `category`, returning their ids in insertion order.
    pub async fn add_questions(&self, n: usize, category: Option<i64>) -> Vec<i64> {
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            ids.push(self.add_question(&format!("Question {}", i + 1), category).await);
        }
        ids
    }
}

pub fn ids(questions: &Value) -> Vec<i64> {
    questions
        .as_array()
        .expect("questions should be an array")
        .iter()
        .map(|q| q["id"].as_i64().expect("question id"))
        .collect()
}
