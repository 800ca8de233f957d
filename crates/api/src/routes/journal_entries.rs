//! Journal entry routes.
//!
//! Endpoints:
//! - GET `/journal-entries` - List entries, newest first
//! - POST `/journal-entries` - Create a draft entry
//! - GET `/journal-entries/{entry_id}` - Get one entry with its lines
//! - POST `/journal-entries/{entry_id}/post` - Post a draft
//! - POST `/journal-entries/{entry_id}/reverse` - Reverse a posted entry

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use fibu_core::ledger::{
    CreateJournalEntry, EntryFilter, EntryStatus, EntryType, JournalEntryLine, LedgerResult,
};
use fibu_shared::types::{AccountId, JournalEntryId, ListLimit};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::error::{bad_request, ledger_error_response};

/// Creates journal entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/journal-entries", get(list_entries).post(create_entry))
        .route("/journal-entries/{entry_id}", get(get_entry))
        .route("/journal-entries/{entry_id}/post", post(post_entry))
        .route("/journal-entries/{entry_id}/reverse", post(reverse_entry))
}

/// Query parameters for listing entries.
#[derive(Debug, Default, Deserialize)]
pub struct ListEntriesQuery {
    /// `draft`, `posted` or `reversed`.
    pub status: Option<String>,
    /// Entry date on or after (`YYYY-MM-DD`).
    pub from: Option<NaiveDate>,
    /// Entry date on or before (`YYYY-MM-DD`).
    pub to: Option<NaiveDate>,
    /// Maximum number of entries.
    pub limit: Option<u64>,
}

/// One line of a create request. A missing side counts as zero.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    /// Account the line books to.
    pub account_id: Uuid,
    /// Soll amount.
    #[serde(default)]
    pub debit_amount: Decimal,
    /// Haben amount.
    #[serde(default)]
    pub credit_amount: Decimal,
    /// Line text.
    pub description: Option<String>,
}

/// Request body for creating an entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    /// Booking date.
    pub entry_date: NaiveDate,
    /// Booking text.
    pub description: String,
    /// Internal notes.
    pub notes: Option<String>,
    /// Origin of the entry; `manual` when omitted.
    #[serde(default)]
    pub entry_type: EntryType,
    /// Lines in display order.
    pub lines: Vec<LineRequest>,
}

impl CreateEntryRequest {
    fn into_input(self) -> LedgerResult<CreateJournalEntry> {
        let lines = self
            .lines
            .into_iter()
            .map(|line| {
                JournalEntryLine::new(
                    AccountId::from_uuid(line.account_id),
                    line.debit_amount,
                    line.credit_amount,
                    line.description,
                )
            })
            .collect::<LedgerResult<Vec<_>>>()?;

        Ok(CreateJournalEntry {
            entry_date: self.entry_date,
            description: self.description,
            notes: self.notes,
            entry_type: self.entry_type,
            lines,
        })
    }
}

/// Request body for reversing an entry.
#[derive(Debug, Deserialize)]
pub struct ReverseRequest {
    /// Why the entry is cancelled; stored on both entries.
    pub reason: String,
}

/// GET `/journal-entries`
async fn list_entries(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListEntriesQuery>,
) -> Response {
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match EntryStatus::parse(raw) {
            Some(s) => Some(s),
            None => return bad_request(format!("Unknown entry status '{raw}'")),
        },
    };

    let filter = EntryFilter {
        status,
        date_from: query.from,
        date_to: query.to,
        limit: ListLimit::new(query.limit),
    };

    match state.ledger.list_entries(&filter).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/journal-entries`
async fn create_entry(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateEntryRequest>,
) -> Response {
    let input = match payload.into_input() {
        Ok(input) => input,
        Err(e) => return ledger_error_response(&e),
    };

    match state.ledger.create_entry(input).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/journal-entries/{entry_id}`
async fn get_entry(State(state): State<AppState>, ApiPath(entry_id): ApiPath<Uuid>) -> Response {
    match state
        .ledger
        .get_entry(JournalEntryId::from_uuid(entry_id))
        .await
    {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/journal-entries/{entry_id}/post`
async fn post_entry(State(state): State<AppState>, ApiPath(entry_id): ApiPath<Uuid>) -> Response {
    match state
        .ledger
        .post_entry(JournalEntryId::from_uuid(entry_id))
        .await
    {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/journal-entries/{entry_id}/reverse`
async fn reverse_entry(
    State(state): State<AppState>,
    ApiPath(entry_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ReverseRequest>,
) -> Response {
    match state
        .ledger
        .reverse_entry(JournalEntryId::from_uuid(entry_id), &payload.reason)
        .await
    {
        Ok(outcome) => {
            info!(
                entry_id = %entry_id,
                reversal_id = %outcome.reversal.id,
                "Entry reversed via API"
            );
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}
