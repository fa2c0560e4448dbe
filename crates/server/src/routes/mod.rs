// crates/server/src/routes/mod.rs
//! API route handlers for the whoshere server.

pub mod health;
pub mod presence;
pub mod registration;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET  /api/health - Health check
/// - GET  /api/presence - Presence summary as JSON
/// - GET  /api/presence/plain - Presence summary as human-readable text
/// - POST /api/reg - Register a MAC under a nickname (form fields mac, nick)
/// - POST /api/dereg - Deregister a MAC (form fields mac, nick)
/// - GET  /api/list/{nick} - MACs registered under a nickname
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", presence::router())
        .nest("/api", registration::router())
        .with_state(state)
}
