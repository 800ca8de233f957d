//! Entry numbers from the `journal_entry_number_seq` PostgreSQL sequence.

use async_trait::async_trait;
use fibu_core::ledger::{EntrySequence, LedgerError, LedgerResult};
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};

#[derive(Debug, FromQueryResult)]
struct NextValue {
    value: i64,
}

/// Entry sequence backed by a database sequence.
///
/// `nextval` is not transactional, so numbers drawn for failed writes stay
/// unused.
#[derive(Debug, Clone)]
pub struct PgEntrySequence {
    db: DatabaseConnection,
}

impl PgEntrySequence {
    /// Creates a new sequence handle.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntrySequence for PgEntrySequence {
    async fn next_value(&self) -> LedgerResult<u64> {
        let row = NextValue::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            "SELECT nextval('journal_entry_number_seq') AS value",
        ))
        .one(&self.db)
        .await
        .map_err(|e| LedgerError::Storage(e.to_string()))?
        .ok_or_else(|| LedgerError::Storage("sequence returned no row".to_string()))?;

        u64::try_from(row.value)
            .map_err(|_| LedgerError::Storage(format!("negative entry number {}", row.value)))
    }
}
