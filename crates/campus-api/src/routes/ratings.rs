//! Course rating routes
//!
//! Reads are public; writes require an authenticated caller, and
//! update/delete additionally require the caller to own the rating.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use campus_auth::{ensure_rating_owner, RatingAction};
use campus_db::CourseRating;

use crate::error::ApiError;
use crate::extractors::{CurrentUser, MaybeUser};
use crate::state::AppState;

use super::types::{validate_rating, RatingRequest};

/// GET /courses/{course_id}/ratings (Public)
async fn get_course_ratings(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    _user: MaybeUser,
) -> Result<Json<Vec<CourseRating>>, ApiError> {
    let ratings = state.service.get_course_ratings(course_id).await?;
    Ok(Json(ratings))
}

/// GET /courses/{course_id}/ratings/stats (Public)
async fn get_course_rating_stats(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    _user: MaybeUser,
) -> Result<Json<campus_core::RatingStats>, ApiError> {
    let stats = state.service.get_course_rating_stats(course_id).await?;
    Ok(Json(stats))
}

/// GET /courses/{course_id}/ratings/user/{user_id} (Public)
///
/// 204 when the user has no active rating for the course.
async fn get_user_course_rating(
    State(state): State<AppState>,
    Path((course_id, user_id)): Path<(i64, i64)>,
    _user: MaybeUser,
) -> Result<Response, ApiError> {
    match state.service.get_user_course_rating(course_id, user_id).await? {
        Some(rating) => Ok(Json(rating).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// POST /courses/{course_id}/ratings (Authenticated)
///
/// The rating owner is always the caller; the body never names a user.
async fn add_course_rating(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<RatingRequest>,
) -> Result<(StatusCode, Json<CourseRating>), ApiError> {
    validate_rating(request.rating)?;

    let rating = state
        .service
        .add_course_rating(course_id, user.id, request.rating)
        .await?;

    metrics::counter!("campus_rating_writes_total").increment(1);
    Ok((StatusCode::CREATED, Json(rating)))
}

/// PUT /courses/{course_id}/ratings/{user_id} (Authenticated, owner only)
async fn update_course_rating(
    State(state): State<AppState>,
    Path((course_id, user_id)): Path<(i64, i64)>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<RatingRequest>,
) -> Result<Json<CourseRating>, ApiError> {
    validate_rating(request.rating)?;
    ensure_rating_owner(&user, user_id, RatingAction::Update)?;

    let rating = state
        .service
        .update_course_rating(course_id, user_id, request.rating)
        .await?;

    metrics::counter!("campus_rating_writes_total").increment(1);
    Ok(Json(rating))
}

/// DELETE /courses/{course_id}/ratings/{user_id} (Authenticated, owner only)
async fn delete_course_rating(
    State(state): State<AppState>,
    Path((course_id, user_id)): Path<(i64, i64)>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, ApiError> {
    ensure_rating_owner(&user, user_id, RatingAction::Delete)?;

    let deleted = state.service.delete_course_rating(course_id, user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!(
            "No active rating found for user {} on course {}",
            user_id, course_id
        )));
    }

    metrics::counter!("campus_rating_writes_total").increment(1);
    Ok(StatusCode::NO_CONTENT)
}

/// Create rating routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses/{course_id}/ratings", get(get_course_ratings))
        .route("/courses/{course_id}/ratings", post(add_course_rating))
        .route("/courses/{course_id}/ratings/stats", get(get_course_rating_stats))
        .route(
            "/courses/{course_id}/ratings/user/{user_id}",
            get(get_user_course_rating),
        )
        .route(
            "/courses/{course_id}/ratings/{user_id}",
            put(update_course_rating),
        )
        .route(
            "/courses/{course_id}/ratings/{user_id}",
            delete(delete_course_rating),
        )
}
