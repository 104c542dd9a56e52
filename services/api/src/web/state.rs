//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::error::ApiError;
use guide_core::ports::DocumentStore;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers.
///
/// The store is an optional capability: `None` means the database was not
/// configured or not reachable at startup, and handlers must take their
/// store-unavailable branches instead of panicking.
pub struct AppState {
    pub store: Option<Arc<dyn DocumentStore>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn DocumentStore>>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    /// The store handle, or the service-unavailable error for endpoints that
    /// cannot degrade gracefully.
    pub fn require_store(&self) -> Result<&Arc<dyn DocumentStore>, ApiError> {
        self.store.as_ref().ok_or(ApiError::StoreUnavailable)
    }
}
