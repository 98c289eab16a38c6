//! Session storage.
//!
//! Pairs opaque session tokens with user identities. Sessions have an
//! independent lifecycle from persistent storage: created at login,
//! deleted at logout, expired by inactivity.

mod memory;

pub use memory::MemorySessions;

use async_trait::async_trait;

use crate::domain::UserId;
use crate::errors::AppResult;

/// Store of current user logins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new session for `user` and return its token.
    /// The token is generated internally from a CSPRNG.
    async fn save_id(&self, user: UserId) -> AppResult<String>;

    /// Retrieve the user for a token, renewing its TTL on success.
    /// Fails `NotFound` if the token is absent or expired.
    async fn id_for_session(&self, token: &str) -> AppResult<UserId>;

    /// Remove a session unconditionally. Deleting a token that does not
    /// exist is not an error.
    async fn delete(&self, token: &str) -> AppResult<()>;
}
