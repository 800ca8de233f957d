//! In-memory ledger store.
//!
//! All state sits behind one `RwLock`; every check-and-write happens inside a
//! single write-lock critical section.

use async_trait::async_trait;
use fibu_shared::types::{AccountId, JournalEntryId};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::account::{Account, AccountFilter};
use super::balance::AccountTotals;
use super::entry::JournalEntry;
use super::error::{LedgerError, LedgerResult};
use super::store::LedgerStore;
use super::types::{EntryFilter, EntryStatus};

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    numbers: BTreeMap<String, AccountId>,
    entries: HashMap<JournalEntryId, JournalEntry>,
}

impl State {
    fn is_referenced(&self, id: AccountId) -> bool {
        self.entries
            .values()
            .any(|e| e.lines.iter().any(|l| l.account_id() == id))
    }

    fn check_status(&self, id: JournalEntryId, expected: EntryStatus, to: EntryStatus) -> LedgerResult<()> {
        let stored = self.entries.get(&id).ok_or(LedgerError::EntryNotFound(id))?;
        if stored.status != expected {
            return Err(LedgerError::InvalidStateTransition {
                from: stored.status,
                to,
            });
        }
        Ok(())
    }

    fn check_accounts_active(&self, entry: &JournalEntry) -> LedgerResult<()> {
        for account_id in entry.referenced_accounts() {
            let account = self
                .accounts
                .get(&account_id)
                .ok_or(LedgerError::AccountNotFound(account_id))?;
            if !account.is_active {
                return Err(LedgerError::InactiveAccountReferenced {
                    account_id,
                    account_number: account.account_number.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Ledger store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    state: RwLock<State>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn insert_account(&self, account: &Account) -> LedgerResult<()> {
        let mut state = self.state.write().await;
        if state.numbers.contains_key(&account.account_number) {
            return Err(LedgerError::DuplicateAccountNumber(
                account.account_number.clone(),
            ));
        }
        state
            .numbers
            .insert(account.account_number.clone(), account.id);
        state.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn account_by_id(&self, id: AccountId) -> LedgerResult<Option<Account>> {
        Ok(self.state.read().await.accounts.get(&id).cloned())
    }

    async fn account_by_number(&self, account_number: &str) -> LedgerResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state
            .numbers
            .get(account_number)
            .and_then(|id| state.accounts.get(id))
            .cloned())
    }

    async fn accounts_by_ids(&self, ids: &[AccountId]) -> LedgerResult<Vec<Account>> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.accounts.get(id))
            .cloned()
            .collect())
    }

    async fn search_accounts(&self, filter: &AccountFilter) -> LedgerResult<Vec<Account>> {
        let state = self.state.read().await;
        // `numbers` is ordered, so this yields accounts by number
        Ok(state
            .numbers
            .values()
            .filter_map(|id| state.accounts.get(id))
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn update_account(&self, account: &Account) -> LedgerResult<()> {
        let mut state = self.state.write().await;
        let stored = state
            .accounts
            .get_mut(&account.id)
            .ok_or(LedgerError::AccountNotFound(account.id))?;
        stored.account_name.clone_from(&account.account_name);
        stored.description.clone_from(&account.description);
        stored.tax_relevant = account.tax_relevant;
        stored.tax_code.clone_from(&account.tax_code);
        stored.is_active = account.is_active;
        stored.updated_at = account.updated_at;
        Ok(())
    }

    async fn delete_account(&self, id: AccountId) -> LedgerResult<()> {
        let mut state = self.state.write().await;
        if !state.accounts.contains_key(&id) {
            return Err(LedgerError::AccountNotFound(id));
        }
        if state.is_referenced(id) {
            return Err(LedgerError::AccountInUse(id));
        }
        if let Some(account) = state.accounts.remove(&id) {
            state.numbers.remove(&account.account_number);
        }
        Ok(())
    }

    async fn insert_entry(&self, entry: &JournalEntry) -> LedgerResult<()> {
        let mut state = self.state.write().await;
        if let Some(missing) = entry
            .lines
            .iter()
            .map(|l| l.account_id())
            .find(|id| !state.accounts.contains_key(id))
        {
            return Err(LedgerError::AccountNotFound(missing));
        }
        state.entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn entry_by_id(&self, id: JournalEntryId) -> LedgerResult<Option<JournalEntry>> {
        Ok(self.state.read().await.entries.get(&id).cloned())
    }

    async fn list_entries(&self, filter: &EntryFilter) -> LedgerResult<Vec<JournalEntry>> {
        let state = self.state.read().await;
        let mut entries: Vec<&JournalEntry> = state
            .entries
            .values()
            .filter(|e| filter.accepts(e.status, e.entry_date))
            .collect();
        entries.sort_by(|a, b| b.entry_number.cmp(&a.entry_number));
        Ok(entries
            .into_iter()
            .take(filter.limit.as_usize())
            .cloned()
            .collect())
    }

    async fn transition_entry(
        &self,
        entry: &JournalEntry,
        expected: EntryStatus,
    ) -> LedgerResult<()> {
        let mut state = self.state.write().await;
        state.check_status(entry.id, expected, entry.status)?;
        if entry.status == EntryStatus::Posted {
            state.check_accounts_active(entry)?;
        }
        state.entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn commit_reversal(
        &self,
        original: &JournalEntry,
        reversal: &JournalEntry,
    ) -> LedgerResult<()> {
        let mut state = self.state.write().await;
        state.check_status(original.id, EntryStatus::Posted, EntryStatus::Reversed)?;
        state.entries.insert(original.id, original.clone());
        state.entries.insert(reversal.id, reversal.clone());
        Ok(())
    }

    async fn effective_totals(&self) -> LedgerResult<Vec<AccountTotals>> {
        let state = self.state.read().await;
        let mut totals: HashMap<AccountId, AccountTotals> = HashMap::new();
        for entry in state.entries.values().filter(|e| e.status.is_effective()) {
            for line in &entry.lines {
                totals
                    .entry(line.account_id())
                    .or_insert_with(|| AccountTotals::new(line.account_id()))
                    .add(line.debit_amount(), line.credit_amount())?;
            }
        }
        Ok(totals.into_values().collect())
    }
}
