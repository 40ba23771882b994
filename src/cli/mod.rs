//! CLI command definitions and handlers
//!
//! The binary stands in for the host page renderer: each stat subcommand
//! renders one shortcode block to stdout.

use std::path::Path;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use zkillstats::cache::{CacheStore, CachedZkillClient, SqliteCache};
use zkillstats::client::ZkillClient;
use zkillstats::config::Config;
use zkillstats::error::Result;
use zkillstats::shortcode::{self, StatAttrs};
use zkillstats::stats::EntityType;

/// Render zKillboard corporation and alliance stat blocks
#[derive(Parser, Debug)]
#[command(name = "zkillstats")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Override config file location
    #[arg(long, global = true, env = "ZKILLSTATS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ZKILLSTATS_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from the API
    #[arg(long, global = true, env = "ZKILLSTATS_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the combined member count block
    Members(StatArgs),

    /// Render the combined ships-destroyed block
    Ships(StatArgs),

    /// Render the combined ISK-destroyed block
    Isk(StatArgs),

    /// Print the footer animation script and styles
    Assets,

    /// Manage the local response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Display version information
    Version,
}

/// Shared arguments for the stat subcommands
#[derive(Args, Debug)]
pub struct StatArgs {
    /// Comma-separated corporation or alliance ids
    #[arg(long)]
    pub id: Option<String>,

    /// Entity type ("alliance"; anything else means corp)
    #[arg(long = "type", default_value = "corp")]
    pub entity_type: String,
}

impl StatArgs {
    fn attrs(&self) -> StatAttrs {
        StatAttrs {
            id: self.id.clone().filter(|raw| !raw.is_empty()),
            entity_type: EntityType::parse(&self.entity_type),
        }
    }
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache entry counts
    Stats,

    /// Drop every cached response
    Clear,
}

/// Which stat block a stat subcommand renders
pub enum Metric {
    Members,
    Ships,
    Isk,
}

/// Render one stat block to stdout
pub async fn render(
    metric: Metric,
    args: &StatArgs,
    config_path: Option<&Path>,
    no_cache: bool,
) -> Result<()> {
    let client = build_client(config_path, no_cache)?;
    let attrs = args.attrs();

    let block = match metric {
        Metric::Members => shortcode::members(&client, &attrs).await,
        Metric::Ships => shortcode::ships(&client, &attrs).await,
        Metric::Isk => shortcode::isk(&client, &attrs).await,
    };
    println!("{}", block);
    Ok(())
}

/// Show cache entry counts
pub fn cache_stats() -> Result<()> {
    let cache = SqliteCache::open()?;
    let stats = cache.stats()?;
    println!(
        "Cache entries: {} valid, {} expired ({} total)",
        stats.valid_entries, stats.expired_entries, stats.total_entries
    );
    Ok(())
}

/// Drop every cached response
pub fn cache_clear() -> Result<()> {
    let cache = SqliteCache::open()?;
    let removed = cache.clear_all()?;
    println!("Removed {} cache entries", removed);
    Ok(())
}

fn build_client(
    config_path: Option<&Path>,
    no_cache: bool,
) -> Result<CachedZkillClient<ZkillClient>> {
    let config = Config::load(config_path)?;
    let client = ZkillClient::new(&config)?;

    let store: Option<Box<dyn CacheStore>> = if no_cache {
        None
    } else {
        match SqliteCache::open() {
            Ok(cache) => Some(Box::new(cache)),
            Err(err) => {
                log::warn!("Cache unavailable, fetching fresh: {}", err);
                None
            }
        }
    };

    Ok(CachedZkillClient::new(client, store)
        .with_ttl(Duration::from_secs(config.cache_ttl_secs)))
}
