//! JSON rendering of ledger and application errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fibu_core::ledger::LedgerError;
use fibu_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// Renders `{"error": CODE, "message": text}` with the status the error maps to.
pub fn ledger_error_response(err: &LedgerError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %err, code = err.error_code(), "Ledger operation failed");
        return (
            status,
            Json(json!({
                "error": err.error_code(),
                "message": "An error occurred"
            })),
        )
            .into_response();
    }

    warn!(error = %err, code = err.error_code(), "Ledger request rejected");
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Renders an application error; server-side messages are not exposed.
pub fn app_error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = if err.is_client_error() {
        err.to_string()
    } else {
        error!(error = %err, "Request failed");
        "An error occurred".to_string()
    };

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": message
        })),
    )
        .into_response()
}

/// 400 response for request parameters that fail to parse.
pub fn bad_request(message: impl Into<String>) -> Response {
    app_error_response(&AppError::Validation(message.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fibu_shared::types::AccountId;

    #[test]
    fn test_status_follows_error_kind() {
        assert_eq!(
            ledger_error_response(&LedgerError::AccountNotFound(AccountId::new())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ledger_error_response(&LedgerError::DuplicateAccountNumber("1000".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ledger_error_response(&LedgerError::EmptyDescription).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ledger_error_response(&LedgerError::Storage("pool closed".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_bad_request_is_validation_error() {
        assert_eq!(bad_request("limit").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            app_error_response(&AppError::Internal("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
