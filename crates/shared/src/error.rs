//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Errors outside the ledger rules.
///
/// Ledger rule violations carry their own codes (see `fibu_core::ledger::LedgerError`)
/// and convert into this type when a caller only needs the coarse category.
/// Request parameters that fail to parse and configuration failures start here.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or rejected input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate or state conflict.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Persistence failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Configuration(_) | Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Machine-readable code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True when the message may be shown to API clients as is.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::NotFound("Konto 1000".into()), 404, "NOT_FOUND")]
    #[case(AppError::Validation("limit".into()), 400, "VALIDATION_ERROR")]
    #[case(AppError::Conflict("1000".into()), 409, "CONFLICT")]
    #[case(AppError::Configuration("port".into()), 500, "CONFIGURATION_ERROR")]
    #[case(AppError::Database("pool closed".into()), 500, "DATABASE_ERROR")]
    #[case(AppError::Internal("panic".into()), 500, "INTERNAL_ERROR")]
    fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
        assert_eq!(err.is_client_error(), status < 500);
    }

    #[test]
    fn test_config_error_converts() {
        let err: AppError = config::ConfigError::Message("missing port".into()).into();
        assert!(matches!(err, AppError::Configuration(ref m) if m == "missing port"));
        assert_eq!(err.to_string(), "Configuration error: missing port");
    }
}
