//! Application state for the HTTP server.

use crate::services::AgendaService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: AgendaService,
}

impl AppState {
    pub fn new(service: AgendaService) -> Self {
        Self { service }
    }
}
