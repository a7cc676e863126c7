//! Applies pending SQL migrations to the configured database.

use anyhow::{Context, Result};
use kringle_backend::config::AppConfig;
use kringle_backend::database::{create_pool, run_migrations};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("kringle_backend={},sqlx=warn", config.log_level).into()
            }),
        )
        .init();

    let pool = create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    run_migrations(&pool, None)
        .await
        .context("Failed to run migrations")?;

    info!("Migrations applied");
    Ok(())
}
