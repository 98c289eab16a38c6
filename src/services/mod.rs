//! Application services layer - Use cases and business logic.
//!
//! The orchestrator validates input, checks authorization through the
//! explicit caller identity, and delegates to the storage contracts.
//! It depends on abstractions (traits) for dependency inversion.

mod service;

pub use service::Warbler;
