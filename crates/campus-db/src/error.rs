//! Database error types

use thiserror::Error;

/// Errors surfaced by the repository layer
///
/// Absence of a row is not an error here; lookups return `Option` and
/// the service layer decides what a miss means.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}
