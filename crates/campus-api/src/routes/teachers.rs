//! Teacher routes and course-teacher assignments

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use campus_db::{NewTeacher, Teacher, UpdateTeacher};

use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

use super::types::{TeacherRequest, TeacherUpdateRequest};

/// GET /teachers (Public)
async fn list_teachers(State(state): State<AppState>) -> Result<Json<Vec<Teacher>>, ApiError> {
    let teachers = state.service.list_teachers().await?;
    Ok(Json(teachers))
}

/// GET /teachers/{id} (Public)
async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Teacher>, ApiError> {
    let teacher = state.service.get_teacher(id).await?;
    Ok(Json(teacher))
}

/// POST /teachers (Authenticated)
async fn create_teacher(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(request): Json<TeacherRequest>,
) -> Result<(StatusCode, Json<Teacher>), ApiError> {
    let teacher = state
        .service
        .create_teacher(NewTeacher {
            name: request.name,
            email: request.email,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

/// PUT /teachers/{id} (Authenticated)
async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: CurrentUser,
    Json(request): Json<TeacherUpdateRequest>,
) -> Result<Json<Teacher>, ApiError> {
    let teacher = state
        .service
        .update_teacher(
            id,
            UpdateTeacher {
                name: request.name,
                email: request.email,
            },
        )
        .await?;
    Ok(Json(teacher))
}

/// DELETE /teachers/{id} (Authenticated)
async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: CurrentUser,
) -> Result<StatusCode, ApiError> {
    state.service.delete_teacher(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /courses/{course_id}/teachers (Public)
async fn get_course_teachers(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<Json<Vec<Teacher>>, ApiError> {
    let teachers = state.service.get_course_teachers(course_id).await?;
    Ok(Json(teachers))
}

/// PUT /courses/{course_id}/teachers/{teacher_id} (Authenticated)
async fn assign_course_teacher(
    State(state): State<AppState>,
    Path((course_id, teacher_id)): Path<(i64, i64)>,
    _user: CurrentUser,
) -> Result<StatusCode, ApiError> {
    state.service.assign_course_teacher(course_id, teacher_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /courses/{course_id}/teachers/{teacher_id} (Authenticated)
async fn remove_course_teacher(
    State(state): State<AppState>,
    Path((course_id, teacher_id)): Path<(i64, i64)>,
    _user: CurrentUser,
) -> Result<StatusCode, ApiError> {
    state.service.remove_course_teacher(course_id, teacher_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create teacher routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teachers", get(list_teachers))
        .route("/teachers", post(create_teacher))
        .route("/teachers/{id}", get(get_teacher))
        .route("/teachers/{id}", put(update_teacher))
        .route("/teachers/{id}", delete(delete_teacher))
        .route("/courses/{course_id}/teachers", get(get_course_teachers))
        .route(
            "/courses/{course_id}/teachers/{teacher_id}",
            put(assign_course_teacher),
        )
        .route(
            "/courses/{course_id}/teachers/{teacher_id}",
            delete(remove_course_teacher),
        )
}
