//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Auth error: {0}")]
    Auth(#[from] campus_auth::AuthError),

    #[error("Core error: {0}")]
    Core(#[from] campus_core::CoreError),

    #[error("Database error: {0}")]
    Database(#[from] campus_db::DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            // Auth errors carry their own status mapping and headers
            ApiError::Auth(e) => return e.into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Core(e) => match e {
                campus_core::CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
                campus_core::CoreError::Duplicate(msg) => (StatusCode::CONFLICT, msg),
                campus_core::CoreError::Validation(msg) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, msg)
                }
                campus_core::CoreError::Database(e) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                }
            },
            ApiError::Database(e) => match e {
                campus_db::DbError::Duplicate(msg) => (StatusCode::CONFLICT, msg),
                other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
            },
        };

        let body = axum::Json(json!({
            "detail": detail
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Validation("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                ApiError::Core(campus_core::CoreError::NotFound("x".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Core(campus_core::CoreError::Duplicate("x".into())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Auth(campus_auth::AuthError::MissingCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::Database(campus_db::DbError::Duplicate("x".into())),
                StatusCode::CONFLICT,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
