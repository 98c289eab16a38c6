//! SeaORM entity definitions
//!
//! Database-specific entities, kept separate from the domain models.

pub mod subscription;
pub mod tweet;
pub mod user;
