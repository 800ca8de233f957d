//! Ledger core for fibu.
//!
//! This crate contains the double-entry rules with ZERO web or database
//! dependencies. Persistence is reached through the [`ledger::LedgerStore`]
//! port; an in-memory implementation lives here, the PostgreSQL one in
//! `fibu-db`.
//!
//! # Modules
//!
//! - `ledger` - Chart of accounts, journal entries, ledger service

pub mod ledger;
