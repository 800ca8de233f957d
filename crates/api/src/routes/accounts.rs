//! Chart of accounts routes.
//!
//! Endpoints:
//! - GET `/accounts` - Search accounts
//! - POST `/accounts` - Create an account
//! - POST `/accounts/seed` - Seed a standard chart
//! - GET `/accounts/balances` - Trial balance over effective entries
//! - GET `/accounts/{account_id}` - Get one account
//! - PATCH `/accounts/{account_id}` - Update mutable fields
//! - DELETE `/accounts/{account_id}` - Delete an unreferenced account
//! - POST `/accounts/{account_id}/deactivate` - Block further postings
//! - POST `/accounts/{account_id}/activate` - Allow postings again

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use fibu_core::ledger::{AccountFilter, AccountType, AccountUpdate, ChartTemplate, NewAccount};
use fibu_shared::types::AccountId;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::error::{bad_request, ledger_error_response};

/// Creates account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/seed", post(seed_accounts))
        .route("/accounts/balances", get(account_balances))
        .route(
            "/accounts/{account_id}",
            get(get_account).patch(update_account).delete(delete_account),
        )
        .route("/accounts/{account_id}/deactivate", post(deactivate_account))
        .route("/accounts/{account_id}/activate", post(activate_account))
}

/// Query parameters for listing accounts.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsQuery {
    /// Substring of account number or name.
    pub search: Option<String>,
    /// Restrict to one account type, e.g. `asset`.
    pub account_type: Option<String>,
    /// Restrict by active flag.
    pub active: Option<bool>,
}

/// Request body for seeding a standard chart.
#[derive(Debug, Deserialize)]
pub struct SeedRequest {
    /// Template name; `SKR03` when omitted.
    pub template: Option<String>,
}

/// GET `/accounts`
async fn list_accounts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListAccountsQuery>,
) -> Response {
    let account_type = match query.account_type.as_deref() {
        None => None,
        Some(raw) => match AccountType::parse(raw) {
            Some(t) => Some(t),
            None => return bad_request(format!("Unknown account type '{raw}'")),
        },
    };

    let filter = AccountFilter {
        search: query.search,
        account_type,
        is_active: query.active,
    };

    match state.ledger.chart().find_accounts(&filter).await {
        Ok(accounts) => (StatusCode::OK, Json(accounts)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/accounts`
async fn create_account(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewAccount>,
) -> Response {
    match state.ledger.chart().create_account(payload).await {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/accounts/seed`
async fn seed_accounts(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SeedRequest>,
) -> Response {
    let template = match payload.template.as_deref().map(ChartTemplate::parse) {
        None => ChartTemplate::Skr03,
        Some(Ok(template)) => template,
        Some(Err(e)) => return ledger_error_response(&e),
    };

    match state.ledger.chart().seed_standard_accounts(template).await {
        Ok(report) => {
            info!(
                template = template.as_str(),
                created = report.created,
                skipped = report.skipped,
                "Chart seeded via API"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/accounts/balances`
async fn account_balances(State(state): State<AppState>) -> Response {
    match state.ledger.account_balances().await {
        Ok(balances) => (StatusCode::OK, Json(balances)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/accounts/{account_id}`
async fn get_account(State(state): State<AppState>, ApiPath(account_id): ApiPath<Uuid>) -> Response {
    match state
        .ledger
        .chart()
        .get_account(AccountId::from_uuid(account_id))
        .await
    {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// PATCH `/accounts/{account_id}`
async fn update_account(
    State(state): State<AppState>,
    ApiPath(account_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<AccountUpdate>,
) -> Response {
    match state
        .ledger
        .chart()
        .update_account(AccountId::from_uuid(account_id), payload)
        .await
    {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// DELETE `/accounts/{account_id}`
async fn delete_account(State(state): State<AppState>, ApiPath(account_id): ApiPath<Uuid>) -> Response {
    match state
        .ledger
        .chart()
        .delete_account(AccountId::from_uuid(account_id))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/accounts/{account_id}/deactivate`
async fn deactivate_account(
    State(state): State<AppState>,
    ApiPath(account_id): ApiPath<Uuid>,
) -> Response {
    match state
        .ledger
        .chart()
        .deactivate_account(AccountId::from_uuid(account_id))
        .await
    {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/accounts/{account_id}/activate`
async fn activate_account(
    State(state): State<AppState>,
    ApiPath(account_id): ApiPath<Uuid>,
) -> Response {
    match state
        .ledger
        .chart()
        .activate_account(AccountId::from_uuid(account_id))
        .await
    {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}
