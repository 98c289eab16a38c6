//! warbler - a microblogging backend
//!
//! Users register, authenticate, post short text messages, follow other
//! users, and read a cursor-paginated feed assembled from the accounts
//! they follow.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and the password value object
//! - **auth**: Explicit per-request caller identity
//! - **session**: Opaque-token session store with sliding expiry
//! - **services**: The business-rule orchestrator
//! - **infra**: Storage contracts, their SQL implementation, migrations
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Business error taxonomy

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod session;

// Re-export commonly used types at crate root
pub use auth::Caller;
pub use config::Config;
pub use domain::{Password, Tweet, TweetWithAuthor, User, UserId, UserWithPassword};
pub use errors::{AppError, AppResult, ErrorKind};
pub use services::Warbler;
pub use session::{MemorySessions, SessionStore};
