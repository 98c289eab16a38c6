//! SQLite-backed implementation of the storage contracts.
//!
//! One shared connection composes three stores ([`UserStore`],
//! [`TweetStore`], [`SubscriptionStore`]); [`UserStore`] covers both the
//! user contract and password verification. SQLite allows a single
//! concurrent writer, so every write serializes behind the connection's
//! mutex while reads proceed concurrently.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, SqlErr,
};
use tokio::sync::Mutex;

use super::entities::{subscription, tweet, user};
use super::{PasswordVerifier, SubscriptionRepository, TweetRepository, UserRepository};
use crate::domain::{Password, Tweet, TweetId, TweetWithAuthor, User, UserId, UserWithPassword};
use crate::errors::{AppError, AppResult};

/// Shared connection with a single-writer gate.
struct SqlConn {
    db: DatabaseConnection,
    // SQLite allows one concurrent write op only.
    write_gate: Mutex<()>,
}

/// The complete SQL-backed storage, composed from the three stores.
pub struct SqlStore {
    pub users: Arc<UserStore>,
    pub tweets: Arc<TweetStore>,
    pub subscriptions: Arc<SubscriptionStore>,
}

impl SqlStore {
    pub fn new(db: DatabaseConnection) -> Self {
        let conn = Arc::new(SqlConn {
            db,
            write_gate: Mutex::new(()),
        });
        Self {
            users: Arc::new(UserStore { conn: conn.clone() }),
            tweets: Arc::new(TweetStore { conn: conn.clone() }),
            subscriptions: Arc::new(SubscriptionStore { conn }),
        }
    }
}

/// Re-type unique-constraint violations; everything else stays a storage
/// error of kind `Unknown`.
fn map_insert_err(e: DbErr, entity: &'static str) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(entity),
        _ => AppError::from(e),
    }
}

// =============================================================================
// Users
// =============================================================================

/// Implements [`UserRepository`] and [`PasswordVerifier`].
pub struct UserStore {
    conn: Arc<SqlConn>,
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, u: UserWithPassword) -> AppResult<UserId> {
        let hash = Password::new(&u.password)?.into_string();

        let model = user::ActiveModel {
            nickname: Set(u.user.nickname),
            display_name: Set(u.user.display_name),
            password_hash: Set(hash),
            ..Default::default()
        };

        let _write = self.conn.write_gate.lock().await;
        let inserted = model
            .insert(&self.conn.db)
            .await
            .map_err(|e| map_insert_err(e, "nickname"))?;

        Ok(UserId(inserted.id))
    }

    async fn save(&self, u: &User) -> AppResult<()> {
        let _write = self.conn.write_gate.lock().await;
        user::Entity::update_many()
            .col_expr(
                user::Column::DisplayName,
                Expr::value(u.display_name.clone()),
            )
            .filter(user::Column::Id.eq(u.id.0))
            .exec(&self.conn.db)
            .await?;
        Ok(())
    }

    async fn get_by_nickname(&self, nickname: &str) -> AppResult<User> {
        let model = user::Entity::find()
            .filter(user::Column::Nickname.eq(nickname))
            .one(&self.conn.db)
            .await?
            .ok_or(AppError::NotFound("user"))?;

        Ok(model.into())
    }

    async fn get_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<i64> = ids.iter().map(|id| id.0).collect();
        let models = user::Entity::find()
            .filter(user::Column::Id.is_in(raw))
            .all(&self.conn.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PasswordVerifier for UserStore {
    async fn password_check(&self, nickname: &str, password: &str) -> AppResult<bool> {
        let model = user::Entity::find()
            .filter(user::Column::Nickname.eq(nickname))
            .one(&self.conn.db)
            .await?;

        // Unknown nickname and hash mismatch are the same non-error false.
        match model {
            Some(model) => Ok(Password::from_hash(model.password_hash).verify(password)),
            None => Ok(false),
        }
    }
}

// =============================================================================
// Tweets
// =============================================================================

pub struct TweetStore {
    conn: Arc<SqlConn>,
}

/// Row shape of the joined feed queries.
#[derive(Debug, FromQueryResult)]
struct TweetAuthorRow {
    id: i64,
    author: String,
    created_at: chrono::DateTime<chrono::Utc>,
    text: String,
}

impl From<TweetAuthorRow> for TweetWithAuthor {
    fn from(row: TweetAuthorRow) -> Self {
        TweetWithAuthor {
            id: row.id,
            author: row.author,
            created_at: row.created_at,
            text: row.text,
        }
    }
}

impl TweetStore {
    /// Base select for both page queries: tweet columns plus the author's
    /// nickname, cursor-filtered and ascending by id.
    fn page_query(after_id: TweetId, limit: u64) -> sea_orm::Select<tweet::Entity> {
        tweet::Entity::find()
            .select_only()
            .column(tweet::Column::Id)
            .column_as(user::Column::Nickname, "author")
            .column(tweet::Column::CreatedAt)
            .column(tweet::Column::Text)
            .join(JoinType::InnerJoin, tweet::Relation::Author.def())
            .filter(tweet::Column::Id.gt(after_id))
            .order_by_asc(tweet::Column::Id)
            .limit(limit)
    }
}

#[async_trait]
impl TweetRepository for TweetStore {
    async fn create(&self, t: Tweet) -> AppResult<TweetId> {
        let model = tweet::ActiveModel {
            author_id: Set(t.author.0),
            created_at: Set(t.created_at),
            text: Set(t.text),
            ..Default::default()
        };

        let _write = self.conn.write_gate.lock().await;
        let inserted = model.insert(&self.conn.db).await?;

        Ok(inserted.id)
    }

    async fn by_id(&self, id: TweetId) -> AppResult<Tweet> {
        let model = tweet::Entity::find_by_id(id)
            .one(&self.conn.db)
            .await?
            .ok_or(AppError::NotFound("tweet"))?;

        Ok(model.into())
    }

    async fn page_for_user(
        &self,
        user: UserId,
        after_id: TweetId,
        limit: u64,
    ) -> AppResult<Vec<TweetWithAuthor>> {
        let rows = Self::page_query(after_id, limit)
            .filter(
                tweet::Column::AuthorId.in_subquery(
                    Query::select()
                        .column(subscription::Column::FolloweeId)
                        .from(subscription::Entity)
                        .and_where(subscription::Column::FollowerId.eq(user.0))
                        .to_owned(),
                ),
            )
            .into_model::<TweetAuthorRow>()
            .all(&self.conn.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn page_for_profile(
        &self,
        author: UserId,
        after_id: TweetId,
        limit: u64,
    ) -> AppResult<Vec<TweetWithAuthor>> {
        let rows = Self::page_query(after_id, limit)
            .filter(tweet::Column::AuthorId.eq(author.0))
            .into_model::<TweetAuthorRow>()
            .all(&self.conn.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// Subscriptions
// =============================================================================

pub struct SubscriptionStore {
    conn: Arc<SqlConn>,
}

#[async_trait]
impl SubscriptionRepository for SubscriptionStore {
    async fn subscribe(&self, from: UserId, to: UserId) -> AppResult<()> {
        let model = subscription::ActiveModel {
            follower_id: Set(from.0),
            followee_id: Set(to.0),
        };

        let _write = self.conn.write_gate.lock().await;
        model
            .insert(&self.conn.db)
            .await
            .map_err(|e| map_insert_err(e, "subscription"))?;

        Ok(())
    }

    async fn unsubscribe(&self, from: UserId, to: UserId) -> AppResult<()> {
        let _write = self.conn.write_gate.lock().await;
        subscription::Entity::delete_many()
            .filter(subscription::Column::FollowerId.eq(from.0))
            .filter(subscription::Column::FolloweeId.eq(to.0))
            .exec(&self.conn.db)
            .await?;
        Ok(())
    }

    async fn subs(&self, user: UserId) -> AppResult<Vec<UserId>> {
        let edges = subscription::Entity::find()
            .filter(subscription::Column::FollowerId.eq(user.0))
            .all(&self.conn.db)
            .await?;

        Ok(edges.into_iter().map(|e| UserId(e.followee_id)).collect())
    }

    async fn subbed(&self, user: UserId) -> AppResult<Vec<UserId>> {
        let edges = subscription::Entity::find()
            .filter(subscription::Column::FolloweeId.eq(user.0))
            .all(&self.conn.db)
            .await?;

        Ok(edges.into_iter().map(|e| UserId(e.follower_id)).collect())
    }
}
