//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::pipeline::Dashboard;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Dashboard built once at startup, read-only afterwards
    pub dashboard: Arc<Dashboard>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dashboard: Dashboard, config: ServerConfig) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
