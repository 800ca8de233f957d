//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for the chart of accounts and journal entries
//! - JSON error rendering for ledger errors and request rejections

pub mod error;
pub mod extractors;
pub mod routes;

use axum::Router;
use fibu_core::ledger::LedgerService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger operations backed by the configured store.
    pub ledger: Arc<LedgerService>,
}

impl AppState {
    /// Wraps a ledger service for the router.
    #[must_use]
    pub fn new(ledger: LedgerService) -> Self {
        Self {
            ledger: Arc::new(ledger),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
