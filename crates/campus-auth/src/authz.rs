//! Ownership checks for rating mutations

use std::fmt;

use crate::error::AuthError;
use crate::token::AuthUser;

/// Mutation being attempted on a rating, used to name the action in
/// the rejection message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingAction {
    Update,
    Delete,
}

impl RatingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingAction::Update => "update",
            RatingAction::Delete => "delete",
        }
    }
}

impl fmt::Display for RatingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enforce that only the owner may mutate a rating
///
/// Pure comparison with no I/O. Must run after authentication succeeds
/// and before the mutating service call, so a forbidden request never
/// touches persisted state.
pub fn ensure_rating_owner(
    caller: &AuthUser,
    owner_id: i64,
    action: RatingAction,
) -> Result<(), AuthError> {
    if caller.id != owner_id {
        return Err(AuthError::OwnerMismatch { action });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(id: i64) -> AuthUser {
        AuthUser { id, email: None }
    }

    #[test]
    fn test_owner_is_allowed() {
        assert!(ensure_rating_owner(&caller(42), 42, RatingAction::Update).is_ok());
        assert!(ensure_rating_owner(&caller(42), 42, RatingAction::Delete).is_ok());
    }

    #[test]
    fn test_non_owner_is_rejected_with_action() {
        let err = ensure_rating_owner(&caller(42), 99, RatingAction::Update).unwrap_err();
        assert!(matches!(
            err,
            AuthError::OwnerMismatch {
                action: RatingAction::Update
            }
        ));

        let err = ensure_rating_owner(&caller(42), 99, RatingAction::Delete).unwrap_err();
        assert!(matches!(
            err,
            AuthError::OwnerMismatch {
                action: RatingAction::Delete
            }
        ));
    }
}
