//! Ledger service.
//!
//! Orchestrates journal entries against the chart of accounts and persists
//! them through the store port. This is the entry point for every outer
//! surface (HTTP routes, seeder, tests).

use chrono::Utc;
use fibu_shared::types::{AccountId, JournalEntryId, format_eur_de};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::account::Account;
use super::balance::AccountBalance;
use super::chart::ChartOfAccounts;
use super::entry::{CreateJournalEntry, JournalEntry};
use super::error::{LedgerError, LedgerResult};
use super::memory::InMemoryLedgerStore;
use super::sequence::{AtomicEntrySequence, EntrySequence};
use super::store::LedgerStore;
use super::types::{EntryFilter, EntryStatus};

/// Result of reversing an entry.
#[derive(Debug, Clone, Serialize)]
pub struct ReversalOutcome {
    /// The original entry, now `reversed`.
    pub original: JournalEntry,
    /// The new, posted reversal entry.
    pub reversal: JournalEntry,
}

/// Ledger service.
#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    sequence: Arc<dyn EntrySequence>,
    chart: ChartOfAccounts,
}

impl LedgerService {
    /// Creates a service over a store and an entry number sequence.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>, sequence: Arc<dyn EntrySequence>) -> Self {
        let chart = ChartOfAccounts::new(Arc::clone(&store));
        Self {
            store,
            sequence,
            chart,
        }
    }

    /// Creates a service backed entirely by process memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryLedgerStore::new()),
            Arc::new(AtomicEntrySequence::new()),
        )
    }

    /// The chart of accounts this service posts against.
    #[must_use]
    pub fn chart(&self) -> &ChartOfAccounts {
        &self.chart
    }

    /// Creates a draft journal entry.
    ///
    /// Validation order:
    /// 1. Entry rules (description, line count, balance)
    /// 2. Every referenced account exists and is active
    ///
    /// The entry number is drawn only after both pass.
    pub async fn create_entry(&self, input: CreateJournalEntry) -> LedgerResult<JournalEntry> {
        if let Err(e) = input.validate() {
            tracing::warn!(error = %e, "Journal entry rejected");
            return Err(e);
        }

        let accounts = self.chart.resolve(&input.referenced_accounts()).await?;
        ensure_active(&accounts)?;

        let entry_number = self.sequence.next_value().await?;
        let entry = JournalEntry::create(input, JournalEntryId::new(), entry_number, Utc::now())?;
        self.store.insert_entry(&entry).await?;

        tracing::info!(
            entry_id = %entry.id,
            entry_number = entry.entry_number,
            total = %format_eur_de(entry.total_debit),
            "Journal entry created"
        );
        Ok(entry)
    }

    /// Loads a journal entry.
    pub async fn get_entry(&self, id: JournalEntryId) -> LedgerResult<JournalEntry> {
        self.store
            .entry_by_id(id)
            .await?
            .ok_or(LedgerError::EntryNotFound(id))
    }

    /// Posts a draft entry.
    ///
    /// The store write only succeeds if the entry is still a draft, so of two
    /// concurrent posts exactly one wins.
    pub async fn post_entry(&self, id: JournalEntryId) -> LedgerResult<JournalEntry> {
        let mut entry = self.get_entry(id).await?;
        let accounts = self.chart.resolve(&entry.referenced_accounts()).await?;

        if let Err(e) = entry.post(&accounts, Utc::now()) {
            tracing::warn!(entry_id = %id, status = %entry.status, error = %e, "Posting rejected");
            return Err(e);
        }
        if let Err(e) = self.store.transition_entry(&entry, EntryStatus::Draft).await {
            tracing::warn!(entry_id = %id, error = %e, "Posting lost to a concurrent change");
            return Err(e);
        }

        tracing::info!(
            entry_id = %id,
            entry_number = entry.entry_number,
            total = %format_eur_de(entry.total_debit),
            "Journal entry posted"
        );
        Ok(entry)
    }

    /// Reverses a posted entry with an offsetting entry.
    ///
    /// The original's transition and the reversal are stored together.
    pub async fn reverse_entry(&self, id: JournalEntryId, reason: &str) -> LedgerResult<ReversalOutcome> {
        let mut original = self.get_entry(id).await?;
        if let Err(e) = original.check_reversible(reason) {
            tracing::warn!(entry_id = %id, status = %original.status, error = %e, "Reversal rejected");
            return Err(e);
        }

        let reversal_number = self.sequence.next_value().await?;
        let reversal = original.reverse(reason, JournalEntryId::new(), reversal_number, Utc::now())?;

        if let Err(e) = self.store.commit_reversal(&original, &reversal).await {
            tracing::warn!(
                entry_id = %id,
                reversal_number,
                error = %e,
                "Reversal lost to a concurrent change"
            );
            return Err(e);
        }

        tracing::info!(
            entry_id = %id,
            reversal_id = %reversal.id,
            reversal_number,
            total = %format_eur_de(reversal.total_debit),
            "Journal entry reversed"
        );
        Ok(ReversalOutcome { original, reversal })
    }

    /// Lists entries, newest entry number first.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `date_from` is after `date_to`.
    pub async fn list_entries(&self, filter: &EntryFilter) -> LedgerResult<Vec<JournalEntry>> {
        if let (Some(from), Some(to)) = (filter.date_from, filter.date_to) {
            if from > to {
                return Err(LedgerError::Validation(format!(
                    "date range start {from} is after end {to}"
                )));
            }
        }
        self.store.list_entries(filter).await
    }

    /// Trial balance over posted and reversed entries, ordered by account number.
    ///
    /// Accounts without movements are omitted.
    pub async fn account_balances(&self) -> LedgerResult<Vec<AccountBalance>> {
        let totals = self.store.effective_totals().await?;
        let ids: Vec<AccountId> = totals.iter().map(|t| t.account_id).collect();
        let accounts = self.chart.resolve(&ids).await?;

        let mut rows: Vec<AccountBalance> = totals
            .iter()
            .filter_map(|t| accounts.get(&t.account_id).map(|a| AccountBalance::from_totals(a, t)))
            .collect();
        rows.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        Ok(rows)
    }
}

impl std::fmt::Debug for LedgerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerService").finish_non_exhaustive()
    }
}

fn ensure_active(accounts: &HashMap<AccountId, Account>) -> LedgerResult<()> {
    match accounts.values().find(|a| !a.is_active) {
        Some(inactive) => Err(LedgerError::InactiveAccountReferenced {
            account_id: inactive.id,
            account_number: inactive.account_number.clone(),
        }),
        None => Ok(()),
    }
}
