//! Shared helpers for API integration tests

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use campus_api::{create_router, AppState};
use campus_auth::TokenCodec;
use campus_core::CourseService;
use campus_db::{Database, NewCourse};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";

/// Build a router over a fresh in-memory database
pub async fn test_app() -> (Router, AppState) {
    let db = Database::new_in_memory().await.unwrap();
    let service = Arc::new(CourseService::new(db));
    let codec = Arc::new(TokenCodec::new(TEST_SECRET, "HS256", 30).unwrap());
    let state = AppState::new(service, codec);
    (create_router(state.clone(), None), state)
}

/// Issue a valid token for the given user
pub fn token_for(state: &AppState, user_id: i64) -> String {
    state
        .codec
        .issue(user_id, Some("test@example.com"))
        .unwrap()
}

/// Seed one course and return its id
pub async fn seed_course(state: &AppState) -> i64 {
    state
        .service
        .create_course(NewCourse {
            name: "Rust Basics".to_string(),
            description: "Intro course".to_string(),
            thumbnail: "https://example.com/rust.png".to_string(),
            slug: "rust-basics".to_string(),
        })
        .await
        .unwrap()
        .id
}

/// Build a request, optionally with a bearer token and JSON body
pub fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request and return status plus parsed JSON body (if any)
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
