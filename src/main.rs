//! Account Store bootstrap
//!
//! Loads `config/<env>.yaml`, connects to PostgreSQL, creates the account
//! table if needed and reports how many accounts are stored.

use std::sync::Arc;

use account_store::{AccountStorage, AppConfig, Database, PostgresStore};
use anyhow::{Context, Result};

/// Value of `--env`/`-e`, defaulting to `dev`
fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    args.windows(2)
        .find(|pair| pair[0] == "--env" || pair[0] == "-e")
        .map(|pair| pair[1].clone())
        .unwrap_or_else(|| "dev".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env).context("Failed to load configuration")?;
    let _log_guard = account_store::logging::init_logging(&app_config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git = env!("GIT_HASH"),
        "Starting account store in {} mode",
        env
    );

    let db = Database::connect(&app_config.postgres)
        .await
        .context("Failed to connect to PostgreSQL")?;
    let store = PostgresStore::new(Arc::new(db));

    store.init().await.context("Failed to initialize schema")?;

    let accounts = store.list().await.context("Failed to list accounts")?;
    tracing::info!(count = accounts.len(), "account store ready");

    Ok(())
}
