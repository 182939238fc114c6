//! Campus REST API
//!
//! This crate provides the Axum-based HTTP API for the campus course
//! catalog, including the bearer-auth guards protecting write endpoints.

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use extractors::{CurrentUser, MaybeUser};
pub use routes::create_router;
pub use state::{AppState, MetricsHandle};
