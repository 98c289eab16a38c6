//! Centralized error handling.
//!
//! Provides a unified error type for the entire application. Every
//! business-rule violation carries one of the five [`ErrorKind`]s; the
//! HTTP boundary maps the kind to a status code and never inspects
//! storage-native error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Closed set of business error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An error that has not been classified further.
    Unknown,
    /// Malformed or invalid request data.
    UserInput,
    /// Caller is not allowed to perform the action.
    Unauthorized,
    /// A referenced entity does not exist.
    NotFound,
    /// Uniqueness violation between the request and stored data.
    Conflict,
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Must be logged out to perform this")]
    LoggedIn,

    #[error("Incorrect login or password")]
    IncorrectLogin,

    // Resource errors
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} already exists")]
    Conflict(&'static str),

    // Validation
    #[error("{0}")]
    UserInput(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Classify the error. Classification is a direct variant read; the
    /// wrapped source is kept for diagnostics only.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Unauthorized | AppError::LoggedIn | AppError::IncorrectLogin => {
                ErrorKind::Unauthorized
            }
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::UserInput(_) => ErrorKind::UserInput,
            AppError::Database(_) | AppError::Internal(_) => ErrorKind::Unknown,
        }
    }

    /// Get error code for the client
    fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::UserInput => "USER_INPUT",
            ErrorKind::Unknown => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::UserInput => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.user_message(),
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn user_input(msg: impl Into<String>) -> Self {
        AppError::UserInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_variants_share_a_kind() {
        assert_eq!(AppError::Unauthorized.kind(), ErrorKind::Unauthorized);
        assert_eq!(AppError::LoggedIn.kind(), ErrorKind::Unauthorized);
        assert_eq!(AppError::IncorrectLogin.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::user_input("empty tweet").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Unauthorized.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("user").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("nickname").status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unclassified_errors_default_to_unknown() {
        let err = AppError::Database(sea_orm::DbErr::Custom("io".into()));
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let response = AppError::NotFound("user").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "user not found");
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden_from_the_body() {
        let response = AppError::internal("connection pool exhausted").into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }
}
