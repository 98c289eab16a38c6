//! Infrastructure layer - External systems integration
//!
//! Database connection management, migrations, and the SQL-backed
//! implementation of the storage contracts.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    PasswordVerifier, SqlStore, SubscriptionRepository, SubscriptionStore, TweetRepository,
    TweetStore, UserRepository, UserStore,
};
