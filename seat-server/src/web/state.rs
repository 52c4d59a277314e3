//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::availability::AvailabilityConfig;
use crate::directory::MemoryDirectory;

/// Shared application state.
///
/// Readers (availability queries) share the directory lock; bookings take
/// it exclusively so the check and the insert cannot interleave.
#[derive(Clone)]
pub struct AppState {
    /// Reference data and the booking ledger
    pub directory: Arc<RwLock<MemoryDirectory>>,

    /// Availability engine configuration
    pub config: Arc<AvailabilityConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(directory: MemoryDirectory, config: AvailabilityConfig) -> Self {
        Self {
            directory: Arc::new(RwLock::new(directory)),
            config: Arc::new(config),
        }
    }
}
