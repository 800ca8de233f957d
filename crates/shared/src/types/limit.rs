//! Result-size limits for list endpoints.

use serde::{Deserialize, Serialize};

/// A bounded number of items to return from a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListLimit(u64);

impl ListLimit {
    /// Limit used when the caller does not ask for one.
    pub const DEFAULT: u64 = 50;
    /// Upper bound regardless of what the caller asks for.
    pub const MAX: u64 = 500;

    /// Builds a limit from an optional request value, clamped to `1..=MAX`.
    #[must_use]
    pub fn new(requested: Option<u64>) -> Self {
        Self(requested.unwrap_or(Self::DEFAULT).clamp(1, Self::MAX))
    }

    /// Returns the limit as `u64` for database queries.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the limit as `usize` for in-memory slicing.
    #[must_use]
    pub fn as_usize(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

impl Default for ListLimit {
    fn default() -> Self {
        Self::new(None)
    }
}
