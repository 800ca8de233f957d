//! Chart of accounts entries.
//!
//! An account carries a type (what it is) and a class (where it sits in the
//! balance sheet or income statement). Only the pairings listed in
//! [`AccountType::allowed_classes`] are valid.

use chrono::{DateTime, Utc};
use fibu_shared::types::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::balance::NormalBalance;
use super::error::{LedgerError, LedgerResult};

/// Account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Resources owned.
    Asset,
    /// Obligations owed.
    Liability,
    /// Owner's equity.
    Equity,
    /// Income.
    Revenue,
    /// Costs.
    Expense,
    /// Valuation allowance against an asset (e.g. Wertberichtigungen).
    ContraAsset,
    /// Valuation allowance against a liability.
    ContraLiability,
}

impl AccountType {
    /// All account types.
    pub const ALL: [Self; 7] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
        Self::ContraAsset,
        Self::ContraLiability,
    ];

    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
            Self::ContraAsset => "contra_asset",
            Self::ContraLiability => "contra_liability",
        }
    }

    /// Parses a type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "revenue" => Some(Self::Revenue),
            "expense" => Some(Self::Expense),
            "contra_asset" => Some(Self::ContraAsset),
            "contra_liability" => Some(Self::ContraLiability),
            _ => None,
        }
    }

    /// Classes this type may be combined with.
    #[must_use]
    pub fn allowed_classes(&self) -> &'static [AccountClass] {
        match self {
            Self::Asset | Self::ContraAsset => {
                &[AccountClass::CurrentAsset, AccountClass::FixedAsset]
            }
            Self::Liability | Self::ContraLiability => &[
                AccountClass::CurrentLiability,
                AccountClass::LongTermLiability,
            ],
            Self::Equity => &[AccountClass::Equity],
            Self::Revenue => &[AccountClass::OperatingRevenue, AccountClass::OtherRevenue],
            Self::Expense => &[AccountClass::OperatingExpense, AccountClass::OtherExpense],
        }
    }

    /// Returns true if `class` is an allowed pairing for this type.
    #[must_use]
    pub fn allows(&self, class: AccountClass) -> bool {
        self.allowed_classes().contains(&class)
    }

    /// Side on which balances of this type normally grow.
    ///
    /// Contra accounts sit on the opposite side of the account they offset.
    #[must_use]
    pub fn normal_balance(&self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense | Self::ContraLiability => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue | Self::ContraAsset => {
                NormalBalance::Credit
            }
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountClass {
    /// Umlaufvermögen.
    CurrentAsset,
    /// Anlagevermögen.
    FixedAsset,
    /// Kurzfristige Verbindlichkeiten.
    CurrentLiability,
    /// Langfristige Verbindlichkeiten.
    LongTermLiability,
    /// Eigenkapital.
    Equity,
    /// Umsatzerlöse.
    OperatingRevenue,
    /// Sonstige Erträge.
    OtherRevenue,
    /// Betriebliche Aufwendungen.
    OperatingExpense,
    /// Sonstige Aufwendungen.
    OtherExpense,
}

impl AccountClass {
    /// Returns the string representation of the class.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentAsset => "current_asset",
            Self::FixedAsset => "fixed_asset",
            Self::CurrentLiability => "current_liability",
            Self::LongTermLiability => "long_term_liability",
            Self::Equity => "equity",
            Self::OperatingRevenue => "operating_revenue",
            Self::OtherRevenue => "other_revenue",
            Self::OperatingExpense => "operating_expense",
            Self::OtherExpense => "other_expense",
        }
    }

    /// Parses a class from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "current_asset" => Some(Self::CurrentAsset),
            "fixed_asset" => Some(Self::FixedAsset),
            "current_liability" => Some(Self::CurrentLiability),
            "long_term_liability" => Some(Self::LongTermLiability),
            "equity" => Some(Self::Equity),
            "operating_revenue" => Some(Self::OperatingRevenue),
            "other_revenue" => Some(Self::OtherRevenue),
            "operating_expense" => Some(Self::OperatingExpense),
            "other_expense" => Some(Self::OtherExpense),
            _ => None,
        }
    }
}

impl fmt::Display for AccountClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Longest accepted account number, in characters.
pub const MAX_ACCOUNT_NUMBER_LEN: usize = 20;

/// Longest accepted account name, in characters.
pub const MAX_ACCOUNT_NAME_LEN: usize = 255;

/// Longest accepted tax key, in characters.
pub const MAX_TAX_CODE_LEN: usize = 32;

/// Input for creating an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    /// Account number, e.g. "1000".
    pub account_number: String,
    /// Display name.
    pub account_name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Account class.
    pub account_class: AccountClass,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the account is relevant for VAT reporting.
    #[serde(default)]
    pub tax_relevant: bool,
    /// Tax key, e.g. "USt19".
    #[serde(default)]
    pub tax_code: Option<String>,
}

/// Editable descriptive fields of an account.
///
/// Number, type and class are fixed once the account exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccountUpdate {
    /// New display name.
    pub account_name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New tax relevance flag.
    pub tax_relevant: Option<bool>,
    /// New tax key.
    pub tax_code: Option<String>,
    /// Activate or deactivate.
    pub is_active: Option<bool>,
}

impl AccountUpdate {
    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.account_name.is_none()
            && self.description.is_none()
            && self.tax_relevant.is_none()
            && self.tax_code.is_none()
            && self.is_active.is_none()
    }
}

/// A chart of accounts entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Unique, trimmed account number.
    pub account_number: String,
    /// Display name.
    pub account_name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Account class.
    pub account_class: AccountClass,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the account is relevant for VAT reporting.
    pub tax_relevant: bool,
    /// Tax key.
    pub tax_code: Option<String>,
    /// Inactive accounts cannot be posted to.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Validates `input` and builds an active account.
    ///
    /// # Errors
    ///
    /// - `Validation` if number or name is blank, or a field exceeds its
    ///   maximum length
    /// - `InvalidTypeClassPairing` if type and class do not match
    pub fn create(input: NewAccount, id: AccountId, now: DateTime<Utc>) -> LedgerResult<Self> {
        let account_number =
            required("account number", &input.account_number, MAX_ACCOUNT_NUMBER_LEN)?;
        let account_name = required("account name", &input.account_name, MAX_ACCOUNT_NAME_LEN)?;
        let tax_code = checked_tax_code(input.tax_code)?;
        if !input.account_type.allows(input.account_class) {
            return Err(LedgerError::InvalidTypeClassPairing {
                account_type: input.account_type,
                account_class: input.account_class,
            });
        }

        Ok(Self {
            id,
            account_number,
            account_name,
            account_type: input.account_type,
            account_class: input.account_class,
            description: non_blank(input.description),
            tax_relevant: input.tax_relevant,
            tax_code,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies descriptive changes.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the update sets no field, the new name is
    /// blank, or a field exceeds its maximum length.
    pub fn apply(&mut self, update: AccountUpdate, now: DateTime<Utc>) -> LedgerResult<()> {
        if update.is_empty() {
            return Err(LedgerError::Validation(
                "update must set at least one field".to_string(),
            ));
        }
        let account_name = update
            .account_name
            .map(|name| required("account name", &name, MAX_ACCOUNT_NAME_LEN))
            .transpose()?;
        let tax_code = update.tax_code.map(|code| checked_tax_code(Some(code))).transpose()?;

        if let Some(name) = account_name {
            self.account_name = name;
        }
        if let Some(description) = update.description {
            self.description = non_blank(Some(description));
        }
        if let Some(tax_relevant) = update.tax_relevant {
            self.tax_relevant = tax_relevant;
        }
        if let Some(code) = tax_code {
            self.tax_code = code;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
        Ok(())
    }
}

/// Trims `value` and checks it is non-blank and at most `max` characters.
fn required(field: &str, value: &str, max: usize) -> LedgerResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LedgerError::Validation(format!("{field} must not be empty")));
    }
    check_length(field, value, max)?;
    Ok(value.to_string())
}

fn checked_tax_code(value: Option<String>) -> LedgerResult<Option<String>> {
    let value = non_blank(value);
    if let Some(code) = &value {
        check_length("tax code", code, MAX_TAX_CODE_LEN)?;
    }
    Ok(value)
}

fn check_length(field: &str, value: &str, max: usize) -> LedgerResult<()> {
    if value.chars().count() > max {
        return Err(LedgerError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Search criteria for accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Case-insensitive substring of number or name.
    pub search: Option<String>,
    /// Restrict to one type.
    pub account_type: Option<AccountType>,
    /// Restrict by active flag.
    pub is_active: Option<bool>,
}

impl AccountFilter {
    /// Returns true if `account` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, account: &Account) -> bool {
        if let Some(account_type) = self.account_type {
            if account.account_type != account_type {
                return false;
            }
        }
        if let Some(is_active) = self.is_active {
            if account.is_active != is_active {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let query = query.to_lowercase();
                account.account_number.to_lowercase().contains(&query)
                    || account.account_name.to_lowercase().contains(&query)
            }
            _ => true,
        }
    }
}
