//! Authentication guard extractors
//!
//! The resolve-caller-or-reject step runs here, before handler logic,
//! as axum extractors over the shared application state.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use campus_auth::{bearer_token, AuthError, AuthUser};
use std::convert::Infallible;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor for an authenticated caller (mandatory)
///
/// Rejects with 401 "Authentication required" when no bearer credential
/// is supplied, and 401 "Could not validate credentials" when the token
/// does not resolve to a valid caller. Both are the same failure class;
/// only the diagnostic message differs.
pub struct CurrentUser(pub AuthUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let Some(token) = bearer_token(&parts.headers) else {
            metrics::counter!("campus_auth_rejections_total").increment(1);
            return Err(AuthError::MissingCredentials.into());
        };

        let user = app_state
            .codec
            .decode(token)
            .as_ref()
            .and_then(AuthUser::from_claims)
            .ok_or_else(|| {
                metrics::counter!("campus_auth_rejections_total").increment(1);
                AuthError::InvalidCredentials
            })?;

        debug!(user_id = user.id, "Authenticated caller resolved");
        Ok(CurrentUser(user))
    }
}

/// Extractor for an optional caller
///
/// Same decode path as [`CurrentUser`], but a missing or invalid token
/// yields `None` instead of a rejection. Never fails.
pub struct MaybeUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let user = bearer_token(&parts.headers)
            .and_then(|token| app_state.codec.decode(token))
            .as_ref()
            .and_then(AuthUser::from_claims);

        Ok(MaybeUser(user))
    }
}
