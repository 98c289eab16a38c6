//! HTTP boundary.
//!
//! Resolves the session cookie into a caller identity, maps business
//! operations onto routes, and renders taxonomy errors as status codes.

pub mod handlers;
pub mod middleware;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
