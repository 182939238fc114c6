//! Application state

use campus_auth::TokenCodec;
use campus_core::CourseService;
use std::sync::Arc;

/// Rendered Prometheus recorder handle for the /metrics endpoint
pub type MetricsHandle = metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CourseService>,
    pub codec: Arc<TokenCodec>,
}

impl AppState {
    pub fn new(service: Arc<CourseService>, codec: Arc<TokenCodec>) -> Self {
        Self { service, codec }
    }
}
