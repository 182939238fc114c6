//! Authentication error types

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::authz::RatingAction;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer credential was supplied at all
    #[error("Authentication required")]
    MissingCredentials,

    /// A credential was supplied but did not resolve to a valid caller.
    /// All decode failures collapse into this one variant; callers are
    /// never told whether the token was malformed, forged, or expired.
    #[error("Could not validate credentials")]
    InvalidCredentials,

    /// The caller is not the owner of the rating being mutated
    #[error("Cannot {action} another user's rating")]
    OwnerMismatch { action: RatingAction },

    /// Signing algorithm names outside the HMAC family are rejected at startup
    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::MissingCredentials | AuthError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::OwnerMismatch { .. } => StatusCode::FORBIDDEN,
            AuthError::UnsupportedAlgorithm(_) | AuthError::Jwt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = axum::Json(json!({
            "detail": self.to_string()
        }));

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages_are_distinct() {
        assert_eq!(AuthError::MissingCredentials.to_string(), "Authentication required");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Could not validate credentials"
        );
    }

    #[test]
    fn test_owner_mismatch_names_the_action() {
        let update = AuthError::OwnerMismatch {
            action: RatingAction::Update,
        };
        assert_eq!(update.to_string(), "Cannot update another user's rating");

        let delete = AuthError::OwnerMismatch {
            action: RatingAction::Delete,
        };
        assert_eq!(delete.to_string(), "Cannot delete another user's rating");
    }

    #[test]
    fn test_unauthorized_responses_carry_www_authenticate() {
        let response = AuthError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_owner_mismatch_is_forbidden() {
        let response = AuthError::OwnerMismatch {
            action: RatingAction::Delete,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
