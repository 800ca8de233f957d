//! Chart of accounts operations.
//!
//! Creation, lookup, search and maintenance of accounts, plus seeding from a
//! standard chart template.

use chrono::Utc;
use fibu_shared::types::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::account::{Account, AccountFilter, AccountUpdate, NewAccount};
use super::error::{LedgerError, LedgerResult};
use super::skr03;
use super::store::LedgerStore;

/// Standard chart templates available for seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTemplate {
    /// DATEV Standardkontenrahmen 03.
    Skr03,
}

impl ChartTemplate {
    /// Returns the template name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skr03 => "SKR03",
        }
    }

    /// Parses a template name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `UnknownChartTemplate` for any other name.
    pub fn parse(name: &str) -> LedgerResult<Self> {
        match name.trim().to_uppercase().as_str() {
            "SKR03" => Ok(Self::Skr03),
            _ => Err(LedgerError::UnknownChartTemplate(name.trim().to_string())),
        }
    }

    /// Account inputs of this template.
    #[must_use]
    pub fn accounts(&self) -> Vec<NewAccount> {
        match self {
            Self::Skr03 => skr03::standard_accounts(),
        }
    }
}

impl fmt::Display for ChartTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of seeding a chart template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    /// Accounts inserted.
    pub created: usize,
    /// Accounts whose number already existed.
    pub skipped: usize,
}

/// The chart of accounts over a ledger store.
#[derive(Clone)]
pub struct ChartOfAccounts {
    store: Arc<dyn LedgerStore>,
}

impl ChartOfAccounts {
    /// Creates the chart over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// - `Validation` if number or name is blank
    /// - `InvalidTypeClassPairing` if type and class do not match
    /// - `DuplicateAccountNumber` if the number is taken
    pub async fn create_account(&self, input: NewAccount) -> LedgerResult<Account> {
        let account = Account::create(input, AccountId::new(), Utc::now())?;
        match self.store.insert_account(&account).await {
            Ok(()) => {
                tracing::info!(
                    account_id = %account.id,
                    account_number = %account.account_number,
                    account_type = %account.account_type,
                    "Account created"
                );
                Ok(account)
            }
            Err(e) => {
                tracing::warn!(
                    account_number = %account.account_number,
                    error = %e,
                    "Account creation rejected"
                );
                Err(e)
            }
        }
    }

    /// Inserts every template account whose number does not exist yet.
    ///
    /// Safe to run repeatedly; existing accounts are counted as skipped.
    pub async fn seed_standard_accounts(&self, template: ChartTemplate) -> LedgerResult<SeedReport> {
        let now = Utc::now();
        let mut report = SeedReport {
            created: 0,
            skipped: 0,
        };

        for input in template.accounts() {
            if self
                .store
                .account_by_number(&input.account_number)
                .await?
                .is_some()
            {
                report.skipped += 1;
                continue;
            }
            let account = Account::create(input, AccountId::new(), now)?;
            match self.store.insert_account(&account).await {
                Ok(()) => report.created += 1,
                // lost a race against a concurrent insert of the same number
                Err(LedgerError::DuplicateAccountNumber(_)) => report.skipped += 1,
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            template = %template,
            created = report.created,
            skipped = report.skipped,
            "Chart template seeded"
        );
        Ok(report)
    }

    /// Loads an account.
    pub async fn get_account(&self, id: AccountId) -> LedgerResult<Account> {
        self.store
            .account_by_id(id)
            .await?
            .ok_or(LedgerError::AccountNotFound(id))
    }

    /// Case-insensitive search over number and name, ordered by number.
    pub async fn find_accounts(&self, filter: &AccountFilter) -> LedgerResult<Vec<Account>> {
        self.store.search_accounts(filter).await
    }

    /// Loads the accounts for `ids`, keyed by ID.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for the first ID that does not exist.
    pub async fn resolve(&self, ids: &[AccountId]) -> LedgerResult<HashMap<AccountId, Account>> {
        let found: HashMap<AccountId, Account> = self
            .store
            .accounts_by_ids(ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();
        if let Some(missing) = ids.iter().find(|id| !found.contains_key(id)) {
            return Err(LedgerError::AccountNotFound(*missing));
        }
        Ok(found)
    }

    /// Changes the descriptive fields or the active flag of an account.
    pub async fn update_account(&self, id: AccountId, update: AccountUpdate) -> LedgerResult<Account> {
        let mut account = self.get_account(id).await?;
        account.apply(update, Utc::now())?;
        self.store.update_account(&account).await?;
        tracing::info!(
            account_id = %id,
            account_number = %account.account_number,
            is_active = account.is_active,
            "Account updated"
        );
        Ok(account)
    }

    /// Marks an account inactive; it can no longer be posted to.
    pub async fn deactivate_account(&self, id: AccountId) -> LedgerResult<Account> {
        self.set_active(id, false).await
    }

    /// Marks an account active again.
    pub async fn activate_account(&self, id: AccountId) -> LedgerResult<Account> {
        self.set_active(id, true).await
    }

    async fn set_active(&self, id: AccountId, is_active: bool) -> LedgerResult<Account> {
        self.update_account(
            id,
            AccountUpdate {
                is_active: Some(is_active),
                ..AccountUpdate::default()
            },
        )
        .await
    }

    /// Deletes an account that no journal line references.
    ///
    /// # Errors
    ///
    /// Returns `AccountInUse` if referenced; deactivate it instead.
    pub async fn delete_account(&self, id: AccountId) -> LedgerResult<()> {
        if let Err(e) = self.store.delete_account(id).await {
            tracing::warn!(account_id = %id, error = %e, "Account deletion rejected");
            return Err(e);
        }
        tracing::info!(account_id = %id, "Account deleted");
        Ok(())
    }
}

impl fmt::Debug for ChartOfAccounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartOfAccounts").finish_non_exhaustive()
    }
}
