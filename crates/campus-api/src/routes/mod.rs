//! API routes

mod classes;
mod courses;
mod health;
mod lessons;
pub mod metrics;
mod ratings;
mod teachers;
mod types;

use axum::Router;
use std::sync::Arc;

use crate::state::{AppState, MetricsHandle};

/// Create the main router
pub fn create_router(state: AppState, metrics_handle: Option<Arc<MetricsHandle>>) -> Router {
    let mut router = Router::new()
        // Health check
        .merge(health::routes())
        // Catalog API
        .merge(courses::routes())
        .merge(teachers::routes())
        .merge(classes::routes())
        .merge(lessons::routes())
        // Ratings API
        .merge(ratings::routes())
        .with_state(state);

    // Add metrics endpoint if handle is provided
    if let Some(handle) = metrics_handle {
        router = router.merge(metrics::routes(handle));
    }

    router
}
