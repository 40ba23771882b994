//! zkillstats CLI - renders zKillboard stat shortcode blocks

use std::path::Path;

use clap::Parser;

mod cli;

use cli::{CacheCommands, Cli, Commands, Metric};
use zkillstats::error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config_path = cli.config.as_deref().map(Path::new);

    match cli.command {
        Commands::Members(args) => {
            cli::render(Metric::Members, &args, config_path, cli.no_cache).await
        }
        Commands::Ships(args) => cli::render(Metric::Ships, &args, config_path, cli.no_cache).await,
        Commands::Isk(args) => cli::render(Metric::Isk, &args, config_path, cli.no_cache).await,
        Commands::Assets => {
            println!("{}", zkillstats::output::footer_assets());
            Ok(())
        }
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Stats => cli::cache_stats(),
            CacheCommands::Clear => cli::cache_clear(),
        },
        Commands::Version => {
            println!("zkillstats version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
