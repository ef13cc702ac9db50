mod init;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Bring a store database to its development baseline: schema migrated,
/// catalog present, stock topped up, variant names readable, test logins and
/// promo codes in place. Safe to run repeatedly.
#[derive(Debug, Parser)]
#[command(name = "storeinit", version)]
#[command(about = "Initialize a store database with test data")]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    let config = storeinit_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");
    ensure_test_data_allowed(&config)?;

    init::summary::print_banner();

    let pool_config = storeinit_db::PoolConfig::from_app_config(&config);
    let pool = storeinit_db::connect_pool(&config.database_url, pool_config)
        .await
        .context("failed to connect to database")?;

    println!("applying migrations...");
    let applied = storeinit_db::run_migrations(&pool)
        .await
        .context("failed to apply migrations")?;
    tracing::info!(applied, "migrations complete");
    println!("migrations complete ({applied} applied)");

    let populator = init::catalog::populator_from_config(&config, pool.clone())?;
    let store = storeinit_db::PgStore::new(pool);
    let report = init::run_initializer(&store, populator.as_ref(), config.bcrypt_cost).await?;

    init::summary::print_summary(&report);
    Ok(())
}

/// Refuse to write the public test logins into a production database.
fn ensure_test_data_allowed(config: &storeinit_core::AppConfig) -> anyhow::Result<()> {
    if !config.env.allows_test_data() {
        anyhow::bail!(
            "STOREINIT_ENV is {}; refusing to provision test accounts and vouchers",
            config.env
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests;
