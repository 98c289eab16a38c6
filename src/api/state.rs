//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::Warbler;
use crate::session::SessionStore;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The business service
    pub service: Arc<Warbler>,
    /// Session token store
    pub sessions: Arc<dyn SessionStore>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
}

impl AppState {
    pub fn new(
        service: Arc<Warbler>,
        sessions: Arc<dyn SessionStore>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            service,
            sessions,
            database,
        }
    }
}
