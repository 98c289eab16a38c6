//! Tweet domain entity and feed projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Store-assigned, monotonically increasing tweet identity. The feed
/// cursor is an exclusive lower bound over these ids.
pub type TweetId = i64;

/// A single tweet. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: TweetId,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
    pub text: String,
}

impl Tweet {
    /// Build a tweet pending insertion; the store assigns the real id.
    pub fn new(author: UserId, created_at: DateTime<Utc>, text: String) -> Self {
        Self {
            id: 0,
            author,
            created_at,
            text,
        }
    }
}

/// Tweet projection with the author resolved to their nickname.
/// Used for feed and profile responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetWithAuthor {
    pub id: TweetId,
    /// Author's nickname.
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub text: String,
}
