//! In-process session store with sliding expiry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use tokio::sync::RwLock;

use crate::config::SESSION_TOKEN_LENGTH;
use crate::domain::UserId;
use crate::errors::{AppError, AppResult};
use crate::session::SessionStore;

struct Entry {
    user: UserId,
    expires_at: Instant,
}

/// In-memory [`SessionStore`]. Safe for concurrent access from many
/// request tasks; renewal and expiry of an entry both happen under the
/// write lock, so a lookup arriving exactly at expiry deterministically
/// returns either "found, renewed" or `NotFound`.
pub struct MemorySessions {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemorySessions {
    /// Create a store whose entries expire `ttl` after their last lookup.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Drop all expired entries. Expiry is otherwise lazy (checked on
    /// access), so long-idle tokens linger until this is called.
    pub async fn purge_expired(&self) {
        let now = Instant::now();
        self.entries
            .write()
            .await
            .retain(|_, entry| entry.expires_at > now);
    }

    /// Number of live (unexpired) sessions.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn generate_token() -> String {
        OsRng
            .sample_iter(&Alphanumeric)
            .take(SESSION_TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn save_id(&self, user: UserId) -> AppResult<String> {
        let token = Self::generate_token();
        let now = Instant::now();

        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.get(&token) {
            // 64 chars of alphanumeric entropy colliding means something
            // is badly wrong with the RNG; refuse rather than overwrite.
            if existing.expires_at > now {
                return Err(AppError::internal("session token collision"));
            }
        }
        entries.insert(
            token.clone(),
            Entry {
                user,
                expires_at: now + self.ttl,
            },
        );

        Ok(token)
    }

    async fn id_for_session(&self, token: &str) -> AppResult<UserId> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        match entries.get_mut(token) {
            Some(entry) if entry.expires_at > now => {
                // renew TTL
                entry.expires_at = now + self.ttl;
                Ok(entry.user)
            }
            Some(_) => {
                entries.remove(token);
                Err(AppError::NotFound("session"))
            }
            None => Err(AppError::NotFound("session")),
        }
    }

    async fn delete(&self, token: &str) -> AppResult<()> {
        self.entries.write().await.remove(token);
        Ok(())
    }
}
