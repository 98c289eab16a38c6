//! HTTP request handlers.

pub mod auth_handler;
pub mod tweet_handler;
pub mod user_handler;
