//! Persistence port for the ledger.
//!
//! A store is the transactional boundary. Implementations must make the
//! status-changing writes atomic: [`LedgerStore::transition_entry`] and
//! [`LedgerStore::commit_reversal`] compare the stored status with the
//! expected one and write only on a match. Posting also re-checks the
//! referenced accounts, so a concurrent deactivation cannot slip in between.

use async_trait::async_trait;
use fibu_shared::types::{AccountId, JournalEntryId};

use super::account::{Account, AccountFilter};
use super::balance::AccountTotals;
use super::entry::JournalEntry;
use super::error::LedgerResult;
use super::types::{EntryFilter, EntryStatus};

/// Storage operations needed by the ledger.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Inserts a new account.
    ///
    /// Fails with `DuplicateAccountNumber` if the number is taken.
    async fn insert_account(&self, account: &Account) -> LedgerResult<()>;

    /// Loads an account by ID.
    async fn account_by_id(&self, id: AccountId) -> LedgerResult<Option<Account>>;

    /// Loads an account by its number.
    async fn account_by_number(&self, account_number: &str) -> LedgerResult<Option<Account>>;

    /// Loads every existing account among `ids`. Missing IDs are skipped.
    async fn accounts_by_ids(&self, ids: &[AccountId]) -> LedgerResult<Vec<Account>>;

    /// Accounts matching `filter`, ordered by account number.
    async fn search_accounts(&self, filter: &AccountFilter) -> LedgerResult<Vec<Account>>;

    /// Overwrites the mutable fields of an existing account.
    ///
    /// Fails with `AccountNotFound` if it does not exist.
    async fn update_account(&self, account: &Account) -> LedgerResult<()>;

    /// Deletes an account no journal line references.
    ///
    /// Fails with `AccountInUse` if referenced, `AccountNotFound` if absent.
    async fn delete_account(&self, id: AccountId) -> LedgerResult<()>;

    /// Inserts a new entry with its lines.
    async fn insert_entry(&self, entry: &JournalEntry) -> LedgerResult<()>;

    /// Loads an entry with its lines.
    async fn entry_by_id(&self, id: JournalEntryId) -> LedgerResult<Option<JournalEntry>>;

    /// Entries matching `filter`, newest entry number first.
    async fn list_entries(&self, filter: &EntryFilter) -> LedgerResult<Vec<JournalEntry>>;

    /// Writes the status fields of `entry` if the stored status is `expected`.
    ///
    /// Fails with `InvalidStateTransition` if the stored status differs,
    /// `EntryNotFound` if absent. When `entry` moves to `posted`, every
    /// referenced account must still exist and be active in the same atomic
    /// step, or the write fails with `AccountNotFound` or
    /// `InactiveAccountReferenced`.
    async fn transition_entry(&self, entry: &JournalEntry, expected: EntryStatus)
    -> LedgerResult<()>;

    /// Atomically stores the reversed `original` and inserts `reversal`.
    ///
    /// The original must still be `posted` in the store; otherwise nothing is
    /// written and `InvalidStateTransition` is returned.
    async fn commit_reversal(
        &self,
        original: &JournalEntry,
        reversal: &JournalEntry,
    ) -> LedgerResult<()>;

    /// Debit and credit sums per account over posted and reversed entries.
    async fn effective_totals(&self) -> LedgerResult<Vec<AccountTotals>>;
}
