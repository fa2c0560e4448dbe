// crates/server/src/lib.rs
//! Whoshere server library.
//!
//! This crate provides the Axum-based HTTP server for the whoshere
//! application: a presence API over the session ledger, registration
//! endpoints, and the background lease poller.

pub mod cli;
pub mod error;
pub mod poller;
pub mod routes;
pub mod state;

pub use error::*;
pub use poller::{run_poller, PollerConfig, ReadFailurePolicy};
pub use routes::api_routes;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (health, presence, registration)
/// - CORS for development (allows any origin)
/// - Request tracing
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================
