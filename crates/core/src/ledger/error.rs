//! Ledger error types.
//!
//! Every rule violation the ledger can report has its own variant with a
//! stable machine code, so outer surfaces can map them without string matching.

use fibu_shared::AppError;
use fibu_shared::types::{AccountId, JournalEntryId};
use rust_decimal::Decimal;
use thiserror::Error;

use super::account::{AccountClass, AccountType};
use super::types::EntryStatus;

/// Result type alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Chart of Accounts ==========
    /// Account number is already taken.
    #[error("Account number {0} already exists")]
    DuplicateAccountNumber(String),

    /// Account type and class do not form an allowed pairing.
    #[error("Account class {account_class} is not allowed for account type {account_type}")]
    InvalidTypeClassPairing {
        /// The requested account type.
        account_type: AccountType,
        /// The requested account class.
        account_class: AccountClass,
    },

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// A journal line references an inactive account.
    #[error("Account {account_number} ({account_id}) is inactive")]
    InactiveAccountReferenced {
        /// The inactive account.
        account_id: AccountId,
        /// Its account number, for the message.
        account_number: String,
    },

    /// Account is referenced by journal lines and cannot be deleted.
    #[error("Account {0} is referenced by journal entries; deactivate it instead")]
    AccountInUse(AccountId),

    /// Chart template name is not known.
    #[error("Unknown chart template: {0}")]
    UnknownChartTemplate(String),

    // ========== Journal Entries ==========
    /// Debits and credits differ.
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Sum of debit amounts.
        debit: Decimal,
        /// Sum of credit amounts.
        credit: Decimal,
    },

    /// Fewer than two lines.
    #[error("Journal entry needs at least 2 lines, got {0}")]
    InsufficientLines(usize),

    /// Description is blank.
    #[error("Journal entry description must not be empty")]
    EmptyDescription,

    /// Line amount breaks the debit/credit rules.
    #[error("Invalid line amount: {0}")]
    InvalidLineAmount(String),

    /// Status does not permit the requested transition.
    #[error("Cannot transition journal entry from {from} to {to}")]
    InvalidStateTransition {
        /// Current status.
        from: EntryStatus,
        /// Requested status.
        to: EntryStatus,
    },

    /// Reversal reason is blank.
    #[error("Reversal reason must not be empty")]
    EmptyReversalReason,

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(JournalEntryId),

    // ========== Generic ==========
    /// Malformed input not covered by a dedicated variant.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Persistence failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateAccountNumber(_) => "DUPLICATE_ACCOUNT_NUMBER",
            Self::InvalidTypeClassPairing { .. } => "INVALID_TYPE_CLASS_PAIRING",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InactiveAccountReferenced { .. } => "INACTIVE_ACCOUNT_REFERENCED",
            Self::AccountInUse(_) => "ACCOUNT_IN_USE",
            Self::UnknownChartTemplate(_) => "UNKNOWN_CHART_TEMPLATE",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::InsufficientLines(_) => "INSUFFICIENT_LINES",
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::InvalidLineAmount(_) => "INVALID_LINE_AMOUNT",
            Self::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            Self::EmptyReversalReason => "EMPTY_REVERSAL_REASON",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InvalidTypeClassPairing { .. }
            | Self::InactiveAccountReferenced { .. }
            | Self::UnknownChartTemplate(_)
            | Self::UnbalancedEntry { .. }
            | Self::InsufficientLines(_)
            | Self::EmptyDescription
            | Self::InvalidLineAmount(_)
            | Self::EmptyReversalReason
            | Self::Validation(_) => 400,

            // 404 Not Found
            Self::AccountNotFound(_) | Self::EntryNotFound(_) => 404,

            // 409 Conflict - duplicates and state conflicts
            Self::DuplicateAccountNumber(_)
            | Self::InvalidStateTransition { .. }
            | Self::AccountInUse(_) => 409,

            // 500 Internal Server Error
            Self::Storage(_) => 500,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err.http_status_code() {
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            400 => Self::Validation(message),
            _ => Self::Database(message),
        }
    }
}
