//! Seeds the configured chart template (SKR03 by default) into PostgreSQL.
//!
//! Safe to re-run: accounts whose number already exists are skipped.
//!
//! Usage: cargo run --bin seeder [TEMPLATE]

use anyhow::Context;
use fibu_core::ledger::ChartTemplate;
use fibu_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| config.database.url.clone())
        .context("DATABASE_URL or FIBU__DATABASE__URL must be set")?;

    let template_name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.ledger.chart_template.clone());
    let template = ChartTemplate::parse(&template_name)?;

    println!("Connecting to database...");
    let db = fibu_db::connect(&database_url, &config.database)
        .await
        .context("Failed to connect to database")?;
    let ledger = fibu_db::ledger_service(db);

    println!("Seeding {} chart of accounts...", template.as_str());
    let report = ledger.chart().seed_standard_accounts(template).await?;

    println!(
        "  Created {} accounts, skipped {} existing",
        report.created, report.skipped
    );
    println!("Seeding complete!");
    Ok(())
}
