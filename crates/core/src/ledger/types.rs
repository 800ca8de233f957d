//! Journal entry domain types.

use chrono::NaiveDate;
use fibu_shared::types::ListLimit;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Journal entry status.
///
/// The valid transitions are:
/// - Draft → Posted (post)
/// - Posted → Reversed (reverse)
///
/// `Reversed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry can still be posted.
    Draft,
    /// Entry is effective and immutable.
    Posted,
    /// Entry has been cancelled by a reversal entry.
    Reversed,
}

impl EntryStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Reversed => "reversed",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "posted" => Some(Self::Posted),
            "reversed" => Some(Self::Reversed),
            _ => None,
        }
    }

    /// Returns true if entries in this status count towards balances.
    ///
    /// A reversed entry still counts; its reversal cancels it out.
    #[must_use]
    pub fn is_effective(&self) -> bool {
        matches!(self, Self::Posted | Self::Reversed)
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Origin of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Entered by hand.
    #[default]
    Manual,
    /// Eröffnungsbuchung.
    OpeningBalance,
    /// Abschlussbuchung.
    Closing,
    /// Korrekturbuchung.
    Adjustment,
    /// Generated from an outgoing invoice.
    Invoice,
    /// Generated from a payment.
    Payment,
    /// Generated from an expense.
    Expense,
    /// Cancels a posted entry. Only produced by reversing.
    Reversal,
}

impl EntryType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::OpeningBalance => "opening_balance",
            Self::Closing => "closing",
            Self::Adjustment => "adjustment",
            Self::Invoice => "invoice",
            Self::Payment => "payment",
            Self::Expense => "expense",
            Self::Reversal => "reversal",
        }
    }

    /// Parses a type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Some(Self::Manual),
            "opening_balance" => Some(Self::OpeningBalance),
            "closing" => Some(Self::Closing),
            "adjustment" => Some(Self::Adjustment),
            "invoice" => Some(Self::Invoice),
            "payment" => Some(Self::Payment),
            "expense" => Some(Self::Expense),
            "reversal" => Some(Self::Reversal),
            _ => None,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Debit and credit sums of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryTotals {
    /// Sum of debit amounts.
    pub debit: Decimal,
    /// Sum of credit amounts.
    pub credit: Decimal,
}

impl EntryTotals {
    /// Amounts are restricted to cents, so exact equality is the balance check.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit == self.credit
    }
}

/// Criteria for listing journal entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Only entries in this status.
    pub status: Option<EntryStatus>,
    /// Entry date on or after.
    pub date_from: Option<NaiveDate>,
    /// Entry date on or before.
    pub date_to: Option<NaiveDate>,
    /// Maximum number of entries returned.
    pub limit: ListLimit,
}

impl EntryFilter {
    /// Returns true if the status and date criteria accept an entry.
    #[must_use]
    pub fn accepts(&self, status: EntryStatus, entry_date: NaiveDate) -> bool {
        self.status.is_none_or(|s| s == status)
            && self.date_from.is_none_or(|from| entry_date >= from)
            && self.date_to.is_none_or(|to| entry_date <= to)
    }
}
