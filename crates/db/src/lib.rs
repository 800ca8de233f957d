//! Database layer with `SeaORM` entities and the PostgreSQL ledger store.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - `PgLedgerStore` and `PgEntrySequence`, the PostgreSQL side of the ledger ports
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{PgEntrySequence, PgLedgerStore};

use std::sync::Arc;
use std::time::Duration;

use fibu_core::ledger::LedgerService;
use fibu_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    Database::connect(options).await
}

/// Ledger service persisting to PostgreSQL.
#[must_use]
pub fn ledger_service(db: DatabaseConnection) -> LedgerService {
    LedgerService::new(
        Arc::new(PgLedgerStore::new(db.clone())),
        Arc::new(PgEntrySequence::new(db)),
    )
}
