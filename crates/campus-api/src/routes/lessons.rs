//! Lesson routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use campus_db::{Lesson, NewLesson, UpdateLesson};

use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

use super::types::{LessonRequest, LessonUpdateRequest};

/// GET /classes/{id}/lessons (Public)
async fn get_class_lessons(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
) -> Result<Json<Vec<Lesson>>, ApiError> {
    let lessons = state.service.get_class_lessons(class_id).await?;
    Ok(Json(lessons))
}

/// POST /classes/{id}/lessons (Authenticated)
async fn create_lesson(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    _user: CurrentUser,
    Json(request): Json<LessonRequest>,
) -> Result<(StatusCode, Json<Lesson>), ApiError> {
    let lesson = state
        .service
        .create_lesson(
            class_id,
            NewLesson {
                name: request.name,
                video_url: request.video_url,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// GET /lessons/{id} (Public)
async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Lesson>, ApiError> {
    let lesson = state.service.get_lesson(id).await?;
    Ok(Json(lesson))
}

/// PUT /lessons/{id} (Authenticated)
async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: CurrentUser,
    Json(request): Json<LessonUpdateRequest>,
) -> Result<Json<Lesson>, ApiError> {
    let lesson = state
        .service
        .update_lesson(
            id,
            UpdateLesson {
                name: request.name,
                video_url: request.video_url,
            },
        )
        .await?;
    Ok(Json(lesson))
}

/// DELETE /lessons/{id} (Authenticated)
async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: CurrentUser,
) -> Result<StatusCode, ApiError> {
    state.service.delete_lesson(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create lesson routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/classes/{id}/lessons", get(get_class_lessons))
        .route("/classes/{id}/lessons", post(create_lesson))
        .route("/lessons/{id}", get(get_lesson))
        .route("/lessons/{id}", put(update_lesson))
        .route("/lessons/{id}", delete(delete_lesson))
}
