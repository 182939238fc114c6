//! Class routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use campus_db::{Class, NewClass, UpdateClass};

use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

use super::types::{ClassRequest, ClassUpdateRequest};

/// GET /courses/{course_id}/classes (Public)
async fn get_course_classes(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<Json<Vec<Class>>, ApiError> {
    let classes = state.service.get_course_classes(course_id).await?;
    Ok(Json(classes))
}

/// POST /courses/{course_id}/classes (Authenticated)
async fn create_class(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    _user: CurrentUser,
    Json(request): Json<ClassRequest>,
) -> Result<(StatusCode, Json<Class>), ApiError> {
    let class = state
        .service
        .create_class(
            course_id,
            NewClass {
                name: request.name,
                description: request.description,
                slug: request.slug,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(class)))
}

/// GET /classes/{id} (Public)
async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Class>, ApiError> {
    let class = state.service.get_class(id).await?;
    Ok(Json(class))
}

/// PUT /classes/{id} (Authenticated)
async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: CurrentUser,
    Json(request): Json<ClassUpdateRequest>,
) -> Result<Json<Class>, ApiError> {
    let class = state
        .service
        .update_class(
            id,
            UpdateClass {
                name: request.name,
                description: request.description,
                slug: request.slug,
            },
        )
        .await?;
    Ok(Json(class))
}

/// DELETE /classes/{id} (Authenticated)
async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: CurrentUser,
) -> Result<StatusCode, ApiError> {
    state.service.delete_class(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create class routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses/{course_id}/classes", get(get_course_classes))
        .route("/courses/{course_id}/classes", post(create_class))
        .route("/classes/{id}", get(get_class))
        .route("/classes/{id}", put(update_class))
        .route("/classes/{id}", delete(delete_class))
}
