//! `SeaORM` entity definitions for the ledger tables.
//!
//! Enumerations are stored as TEXT with CHECK constraints and converted with
//! the `as_str`/`parse` pairs of the core types.

pub mod accounts;
pub mod journal_entries;
pub mod journal_entry_lines;
