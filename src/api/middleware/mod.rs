//! HTTP middleware.

mod auth;

pub use auth::{require_auth, session_middleware};
