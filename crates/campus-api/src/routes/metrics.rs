//! Prometheus exposition endpoint
//!
//! The route only renders; the counters themselves are registered where
//! the events happen (health checks, rating writes, auth rejections).

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use std::sync::Arc;

use crate::state::MetricsHandle;

/// Create the metrics route over the recorder handle
pub fn routes(handle: Arc<MetricsHandle>) -> Router {
    Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(handle)
}

/// GET /metrics (Public)
async fn render_metrics(State(handle): State<Arc<MetricsHandle>>) -> impl IntoResponse {
    handle.render()
}
