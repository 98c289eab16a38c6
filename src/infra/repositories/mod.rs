//! Repository layer - Storage contracts and their SQL implementation.
//!
//! Four independent capability traits that any durable backend must
//! implement. The service layer depends only on these abstractions; the
//! SQLite-backed [`SqlStore`] is the reference implementation.

pub(crate) mod entities;
mod sql_store;

pub use sql_store::{SqlStore, SubscriptionStore, TweetStore, UserStore};

use async_trait::async_trait;

use crate::domain::{Tweet, TweetId, TweetWithAuthor, User, UserId, UserWithPassword};
use crate::errors::AppResult;

/// User persistence and lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, hashing the password first.
    /// Fails `Conflict` if the nickname is already taken.
    async fn create(&self, user: UserWithPassword) -> AppResult<UserId>;

    /// Update an existing user. Only the display name is mutable.
    async fn save(&self, user: &User) -> AppResult<()>;

    /// Fails `NotFound` if no user holds the nickname.
    async fn get_by_nickname(&self, nickname: &str) -> AppResult<User>;

    /// Batched lookup. Result order is unspecified; missing ids are
    /// silently omitted.
    async fn get_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>>;
}

/// Credential verification against stored password hashes.
#[async_trait]
pub trait PasswordVerifier: Send + Sync {
    /// Returns false (not an error) for an unknown nickname or a hash
    /// mismatch; errors signal storage-internal failure only.
    /// Comparison is constant-time against the stored hash.
    async fn password_check(&self, nickname: &str, password: &str) -> AppResult<bool>;
}

/// Tweet persistence and feed queries.
#[async_trait]
pub trait TweetRepository: Send + Sync {
    /// Persist a tweet, assigning its id; the creation timestamp is the
    /// one supplied by the caller.
    async fn create(&self, tweet: Tweet) -> AppResult<TweetId>;

    /// Fails `NotFound` if the tweet does not exist.
    async fn by_id(&self, id: TweetId) -> AppResult<Tweet>;

    /// Feed page: tweets from every account `user` follows, with
    /// `id > after_id`, ascending by id, capped at `limit`.
    async fn page_for_user(
        &self,
        user: UserId,
        after_id: TweetId,
        limit: u64,
    ) -> AppResult<Vec<TweetWithAuthor>>;

    /// Same filter, order, and cap, restricted to a single author.
    async fn page_for_profile(
        &self,
        author: UserId,
        after_id: TweetId,
        limit: u64,
    ) -> AppResult<Vec<TweetWithAuthor>>;
}

/// Follower→followee edge persistence and lookup.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Record the edge `from`→`to`. Fails `Conflict` if it already exists.
    async fn subscribe(&self, from: UserId, to: UserId) -> AppResult<()>;

    /// Remove the edge `from`→`to`; removing a missing edge is a no-op.
    async fn unsubscribe(&self, from: UserId, to: UserId) -> AppResult<()>;

    /// Everyone `user` follows.
    async fn subs(&self, user: UserId) -> AppResult<Vec<UserId>>;

    /// Everyone following `user`.
    async fn subbed(&self, user: UserId) -> AppResult<Vec<UserId>>;
}
