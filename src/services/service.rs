//! Business-rule orchestration.
//!
//! [`Warbler`] is a stateless coordinator over the four storage
//! contracts. Every operation takes the request's [`Caller`] explicitly;
//! the only state machine is the binary "has identity / has none" gate
//! checked per operation.

use std::sync::Arc;

use chrono::Utc;

use crate::auth::Caller;
use crate::config::{MIN_PASSWORD_LENGTH, TWEET_PAGE_SIZE};
use crate::domain::{Tweet, TweetId, TweetWithAuthor, User, UserId, UserWithPassword};
use crate::errors::{AppError, AppResult};
use crate::infra::{PasswordVerifier, SubscriptionRepository, TweetRepository, UserRepository};

/// The microblogging service.
pub struct Warbler {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordVerifier>,
    tweets: Arc<dyn TweetRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl Warbler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordVerifier>,
        tweets: Arc<dyn TweetRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            users,
            passwords,
            tweets,
            subscriptions,
        }
    }

    /// Post a new tweet, stamped with the current time.
    pub async fn tweet(&self, caller: Caller, text: String) -> AppResult<TweetId> {
        let author = caller.user_id()?;

        if text.is_empty() {
            return Err(AppError::user_input("tweet cannot be empty"));
        }

        self.tweets
            .create(Tweet::new(author, Utc::now(), text))
            .await
    }

    /// A page of the caller's feed. `after_id` is the last-seen tweet id
    /// (exclusive); 0 starts from the beginning.
    pub async fn tweet_page(
        &self,
        caller: Caller,
        after_id: TweetId,
    ) -> AppResult<Vec<TweetWithAuthor>> {
        let user = caller.user_id()?;
        self.tweets
            .page_for_user(user, after_id, TWEET_PAGE_SIZE)
            .await
    }

    /// A page of one user's tweets. No login required.
    pub async fn profile_tweets(
        &self,
        nickname: &str,
        after_id: TweetId,
    ) -> AppResult<Vec<TweetWithAuthor>> {
        let target = self.users.get_by_nickname(nickname).await?;
        self.tweets
            .page_for_profile(target.id, after_id, TWEET_PAGE_SIZE)
            .await
    }

    /// Subscribe the caller to another user.
    pub async fn subscribe(&self, caller: Caller, target_nickname: &str) -> AppResult<()> {
        let (user, target) = self.resolve_edge(caller, target_nickname).await?;
        self.subscriptions.subscribe(user, target).await
    }

    /// Unsubscribe the caller from another user.
    pub async fn unsubscribe(&self, caller: Caller, target_nickname: &str) -> AppResult<()> {
        let (user, target) = self.resolve_edge(caller, target_nickname).await?;
        self.subscriptions.unsubscribe(user, target).await
    }

    async fn resolve_edge(&self, caller: Caller, target_nickname: &str) -> AppResult<(UserId, UserId)> {
        let user = caller.user_id()?;
        let target = self.users.get_by_nickname(target_nickname).await?;

        if user == target.id {
            return Err(AppError::user_input("cannot subscribe to yourself"));
        }

        Ok((user, target.id))
    }

    /// Everyone the caller follows, as full user records.
    pub async fn subscriptions(&self, caller: Caller) -> AppResult<Vec<User>> {
        let user = caller.user_id()?;
        let subs = self.subscriptions.subs(user).await?;
        self.users.get_by_ids(&subs).await
    }

    /// Everyone following the caller, as full user records.
    pub async fn subscribers(&self, caller: Caller) -> AppResult<Vec<User>> {
        let user = caller.user_id()?;
        let subs = self.subscriptions.subbed(user).await?;
        self.users.get_by_ids(&subs).await
    }

    /// Create a new user. The caller must be anonymous.
    pub async fn create_user(&self, caller: Caller, user: UserWithPassword) -> AppResult<UserId> {
        caller.require_anonymous()?;

        if user.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::user_input(format!(
                "password can't be shorter than {} chars",
                MIN_PASSWORD_LENGTH
            )));
        }

        self.users.create(user).await
    }

    /// Update the caller's own profile. Only the display name is mutable.
    pub async fn modify_user(&self, caller: Caller, mut user: User) -> AppResult<()> {
        user.id = caller.user_id()?;
        self.users.save(&user).await
    }

    /// Look up a user by nickname. No login required.
    pub async fn user_by_nickname(&self, nickname: &str) -> AppResult<User> {
        self.users.get_by_nickname(nickname).await
    }

    /// Check a login/password pair. The caller must be anonymous; a
    /// failed match is `IncorrectLogin`, never a generic failure.
    pub async fn check_password(
        &self,
        caller: Caller,
        nickname: &str,
        password: &str,
    ) -> AppResult<()> {
        caller.require_anonymous()?;

        if !self.passwords.password_check(nickname, password).await? {
            return Err(AppError::IncorrectLogin);
        }
        Ok(())
    }
}
