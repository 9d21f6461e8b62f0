//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::DashboardContext;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded and resampled data, read-only for the server's lifetime
    pub context: Arc<DashboardContext>,
}

impl AppState {
    pub fn new(context: DashboardContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }
}
