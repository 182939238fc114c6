//! Course catalog routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use campus_db::{Course, NewCourse, UpdateCourse};

use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

use super::types::{CourseRequest, CourseUpdateRequest};

/// GET /courses (Public)
async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, ApiError> {
    let courses = state.service.list_courses().await?;
    Ok(Json(courses))
}

/// GET /courses/{course_id} (Public)
async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Course>, ApiError> {
    let course = state.service.get_course(id).await?;
    Ok(Json(course))
}

/// POST /courses (Authenticated)
async fn create_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(request): Json<CourseRequest>,
) -> Result<(StatusCode, Json<Course>), ApiError> {
    let course = state
        .service
        .create_course(NewCourse {
            name: request.name,
            description: request.description,
            thumbnail: request.thumbnail,
            slug: request.slug,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /courses/{course_id} (Authenticated)
async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: CurrentUser,
    Json(request): Json<CourseUpdateRequest>,
) -> Result<Json<Course>, ApiError> {
    let course = state
        .service
        .update_course(
            id,
            UpdateCourse {
                name: request.name,
                description: request.description,
                thumbnail: request.thumbnail,
                slug: request.slug,
            },
        )
        .await?;
    Ok(Json(course))
}

/// DELETE /courses/{course_id} (Authenticated)
async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: CurrentUser,
) -> Result<StatusCode, ApiError> {
    state.service.delete_course(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create course routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses", post(create_course))
        .route("/courses/{course_id}", get(get_course))
        .route("/courses/{course_id}", put(update_course))
        .route("/courses/{course_id}", delete(delete_course))
}
