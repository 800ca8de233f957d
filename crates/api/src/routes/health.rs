//! Health check endpoint.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use fibu_core::ledger::EntryFilter;
use fibu_shared::types::ListLimit;
use serde::Serialize;
use tracing::error;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the ledger store cannot be read.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

/// GET `/health`: reads one journal entry to prove the store answers.
async fn health_check(State(state): State<AppState>) -> Response {
    let probe = EntryFilter {
        limit: ListLimit::new(Some(1)),
        ..EntryFilter::default()
    };

    let (code, status) = match state.ledger.list_entries(&probe).await {
        Ok(_) => (StatusCode::OK, "healthy"),
        Err(e) => {
            error!(error = %e, "Ledger store probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
        .into_response()
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
