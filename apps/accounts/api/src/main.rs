use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{self, DatabaseConnection};
use migration::Migrator;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Time allowed for closing connections after a shutdown signal
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = connect_database(&config).await?;

    let state = AppState { config, db };

    let app = api::app(&state)?;
    let AppState { config, db } = state;

    info!("Starting accounts API (shutdown timeout {:?})", SHUTDOWN_TIMEOUT);

    create_production_app(app, &config.server, SHUTDOWN_TIMEOUT, async move {
        if let Some(db) = db {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Accounts API shutdown complete");
    Ok(())
}

/// Connect to PostgreSQL and apply migrations, or return `None` when no
/// database is configured.
async fn connect_database(config: &Config) -> eyre::Result<Option<DatabaseConnection>> {
    let Some(database) = config.database.clone() else {
        warn!("DATABASE_URL not set; accounts are kept in memory and lost on restart");
        return Ok(None);
    };

    let db = postgres::connect_from_config_with_retry(database, Some(config.db_retry.clone()))
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        postgres::run_migrations::<Migrator>(&db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
    } else {
        info!("RUN_MIGRATIONS=false, skipping migrations");
    }

    Ok(Some(db))
}
