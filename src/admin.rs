//! Administrative command handlers.
//!
//! This module contains CLI command handlers for administrative tasks
//! such as running migrations, viewing statistics, deactivating a link by
//! its secret key, and pinging the cache server.

use crate::cache::Cache;
use crate::config::Config;
use crate::db::Repository;
use crate::error::AppResult;
use clap::Subcommand;
use tracing::info;

/// Administrative commands available via CLI.
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Run database migrations
    Migrate,

    /// Show statistics
    Stats,

    /// Deactivate a link by its secret key
    Deactivate {
        /// The link's secret admin key
        secret_key: String,
    },

    /// Ping the cache server
    PingCache,
}

/// Run an administrative command with the given configuration.
pub async fn run(config: Config, admin_command: AdminCommands) -> AppResult<()> {
    match admin_command {
        AdminCommands::Migrate => migrate(config).await,
        AdminCommands::Stats => stats(config).await,
        AdminCommands::Deactivate { secret_key } => deactivate(config, secret_key).await,
        AdminCommands::PingCache => ping_cache(config).await,
    }
}

async fn connect(config: &Config) -> AppResult<Repository> {
    Repository::new(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
        config.database.acquire_timeout_seconds,
    )
    .await
}

/// Run database migrations.
async fn migrate(config: Config) -> AppResult<()> {
    info!("Running database migrations...");

    let repository = connect(&config).await?;
    repository.run_migrations().await?;

    info!("Migrations completed successfully");
    Ok(())
}

/// Display statistics.
async fn stats(config: Config) -> AppResult<()> {
    info!("Fetching statistics...");

    let repository = connect(&config).await?;
    let stats = repository.get_stats().await?;

    println!("\n=== keylink Statistics ===");
    println!("Total links:     {}", stats.total_links);
    println!("Total clicks:    {}", stats.total_clicks);
    println!("Active links:    {}", stats.active_links);
    println!("Inactive links:  {}", stats.inactive_links);
    println!();

    Ok(())
}

/// Deactivate a link by its secret key. Same soft delete the HTTP
/// surface performs, for operators holding the key.
async fn deactivate(config: Config, secret_key: String) -> AppResult<()> {
    let repository = connect(&config).await?;

    match repository.deactivate(&secret_key).await? {
        Some(record) => {
            info!("Deactivated link '{}' -> {}", record.key, record.target_url);
        }
        None => {
            info!("No link matches that secret key");
        }
    }

    Ok(())
}

/// Ping the cache server.
async fn ping_cache(config: Config) -> AppResult<()> {
    info!("Pinging cache server...");

    let cache = Cache::new(
        &config.cache.url,
        config.cache.max_connections,
        config.cache.default_ttl_seconds,
    )
    .await?;

    let response = cache.ping().await?;

    info!("Cache server responded: {}", response);

    Ok(())
}
