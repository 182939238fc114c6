//! Campus Authentication and Authorization
//!
//! This crate provides JWT-based authentication and per-resource
//! ownership checks for the campus course catalog.

pub mod authz;
pub mod bearer;
pub mod error;
pub mod token;

pub use authz::{ensure_rating_owner, RatingAction};
pub use bearer::bearer_token;
pub use error::AuthError;
pub use token::{AuthUser, Claims, TokenCodec};
