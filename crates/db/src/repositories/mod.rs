//! Store implementations over `SeaORM`.

pub mod ledger;
pub mod sequence;

pub use ledger::PgLedgerStore;
pub use sequence::PgEntrySequence;
