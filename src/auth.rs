//! Request caller identity.
//!
//! The HTTP boundary resolves the session token once and builds a
//! [`Caller`] that is passed explicitly into every service operation.
//! Business logic never constructs a non-anonymous caller itself.

use crate::domain::UserId;
use crate::errors::{AppError, AppResult};

/// The authenticated identity of the current request, or anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caller(Option<UserId>);

impl Caller {
    /// Identity resolved from a valid session.
    pub fn user(id: UserId) -> Self {
        Self(Some(id))
    }

    /// No login info for the request.
    pub fn anonymous() -> Self {
        Self(None)
    }

    /// The single authorization primitive: returns the caller's identity
    /// or `Unauthorized` if none was established.
    pub fn user_id(&self) -> AppResult<UserId> {
        self.0.ok_or(AppError::Unauthorized)
    }

    /// Inverse gate for operations that require being logged out
    /// (user creation, password check).
    pub fn require_anonymous(&self) -> AppResult<()> {
        if self.0.is_some() {
            return Err(AppError::LoggedIn);
        }
        Ok(())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_anonymous_caller_has_no_identity() {
        let caller = Caller::anonymous();
        let err = caller.user_id().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(caller.require_anonymous().is_ok());
    }

    #[test]
    fn test_logged_in_caller() {
        let caller = Caller::user(UserId(7));
        assert_eq!(caller.user_id().unwrap(), UserId(7));
        let err = caller.require_anonymous().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}
