// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;
use std::time::Instant;

use whoshere_core::{RegistrationStore, SessionTracker};

/// Shared application state accessible from all route handlers.
///
/// The session tracker is the only mutable shared state; handlers only ever
/// call its `snapshot()`, so they can never block the poller for longer
/// than the snapshot copy.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// The session ledger maintained by the background poller.
    pub tracker: Arc<SessionTracker>,
    /// The MAC → nickname registry.
    pub registry: RegistrationStore,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(tracker: Arc<SessionTracker>, registry: RegistrationStore) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            tracker,
            registry,
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
