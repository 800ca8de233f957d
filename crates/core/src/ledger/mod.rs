//! Double-entry bookkeeping logic.
//!
//! This module implements the ledger core:
//! - Chart of accounts (type/class model, SKR03 template)
//! - Journal entry lines and the journal entry aggregate
//! - Balance calculations (trial balance)
//! - Entry numbering
//! - The store port and its in-memory implementation
//! - Ledger service orchestrating all of the above

pub mod account;
pub mod balance;
pub mod chart;
pub mod entry;
pub mod error;
pub mod line;
pub mod memory;
pub mod sequence;
pub mod service;
mod skr03;
pub mod store;
pub mod types;

#[cfg(test)]
mod entry_props;

pub use account::{
    Account, AccountClass, AccountFilter, AccountType, AccountUpdate, MAX_ACCOUNT_NAME_LEN,
    MAX_ACCOUNT_NUMBER_LEN, MAX_TAX_CODE_LEN, NewAccount,
};
pub use balance::{AccountBalance, AccountTotals, NormalBalance};
pub use chart::{ChartOfAccounts, ChartTemplate, SeedReport};
pub use entry::{CreateJournalEntry, JournalEntry};
pub use error::{LedgerError, LedgerResult};
pub use line::JournalEntryLine;
pub use memory::InMemoryLedgerStore;
pub use sequence::{AtomicEntrySequence, EntrySequence};
pub use service::{LedgerService, ReversalOutcome};
pub use store::LedgerStore;
pub use types::{EntryFilter, EntryStatus, EntryTotals, EntryType};
