//! Campus Core Business Logic
//!
//! This crate provides the course catalog service: catalog CRUD and
//! rating operations over the database layer.

pub mod error;
pub mod service;

pub use error::CoreError;
pub use service::{validate_slug, CourseService, RatingStats};
