//! Domain layer - Core business entities and logic
//!
//! Contains the core domain models that represent business concepts
//! independent of infrastructure concerns.

pub mod password;
pub mod tweet;
pub mod user;

pub use password::Password;
pub use tweet::{Tweet, TweetId, TweetWithAuthor};
pub use user::{User, UserId, UserWithPassword};
