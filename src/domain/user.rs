//! User domain entity and related types.

use serde::{Deserialize, Serialize};

/// Opaque numeric user identity, assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Ignored on input; the store assigns identities.
    #[serde(default)]
    pub id: UserId,
    /// Unique public handle.
    pub nickname: String,
    pub display_name: String,
}

/// User plus a plaintext password.
///
/// Input shape for user creation only; never persisted or returned as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct UserWithPassword {
    #[serde(flatten)]
    pub user: User,
    pub password: String,
}
