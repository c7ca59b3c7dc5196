//! Application state shared across handlers

use crate::inference::Registry;

use super::ServerConfig;

/// Read-only after startup, so handlers share it without locking.
pub struct AppState {
    pub config: ServerConfig,
    pub registry: Registry,
}

impl AppState {
    pub fn new(config: ServerConfig, registry: Registry) -> Self {
        Self { config, registry }
    }
}
