//! fibu API server.
//!
//! Serves the ledger over HTTP. With `database.url` set the ledger lives in
//! PostgreSQL, otherwise in process memory.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fibu_api::{AppState, create_router};
use fibu_core::ledger::{ChartTemplate, LedgerService};
use fibu_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let json = config.logging.json;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fibu=debug,tower_http=debug".into()),
        )
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();

    let ledger = match config.database.url.as_deref() {
        Some(url) => {
            let db = fibu_db::connect(url, &config.database).await?;
            info!(
                max_connections = config.database.max_connections,
                "Connected to database"
            );
            fibu_db::ledger_service(db)
        }
        None => {
            warn!("No database.url configured, ledger is kept in memory");
            LedgerService::in_memory()
        }
    };

    if config.ledger.seed_on_startup {
        let template = ChartTemplate::parse(&config.ledger.chart_template)?;
        let report = ledger.chart().seed_standard_accounts(template).await?;
        info!(
            template = template.as_str(),
            created = report.created,
            skipped = report.skipped,
            "Standard chart seeded on startup"
        );
    }

    let app = create_router(AppState::new(ledger));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
