//! Applies the ledger schema (accounts, journal entries, lines, number sequence).
//!
//! Reads `DATABASE_URL`. Usage:
//!   migrator up      - Apply pending migrations
//!   migrator down    - Roll back the ledger schema
//!   migrator status  - List applied migrations
//!   migrator fresh   - Drop everything and re-apply

use fibu_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI installs its own tracing subscriber.
    cli::run_cli(Migrator).await;
}
