//! Catalog-Atlas main entry point
//!
//! This is the command-line interface for the Catalog-Atlas catalog tree
//! mapper.

use catalog_atlas::config::{load_config_with_hash, Config};
use catalog_atlas::crawler::crawl;
use catalog_atlas::output::print_summary;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Atlas: a marketplace catalog tree mapper
///
/// Catalog-Atlas walks the category tree of a remote catalog API, fetches
/// sub-category facets for leaf categories, and writes flattened records
/// grouped by top-level category.
#[derive(Parser, Debug)]
#[command(name = "catalog-atlas")]
#[command(version = "1.0.0")]
#[command(about = "A marketplace catalog tree mapper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_atlas=info,warn"),
            1 => EnvFilter::new("catalog_atlas=debug,info"),
            2 => EnvFilter::new("catalog_atlas=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Atlas Dry Run ===\n");

    println!("Catalog:");
    println!("  Menu URL: {}", config.catalog.menu_url);
    println!("  Filter base URL: {}", config.catalog.filter_base_url);

    println!("\nTransport:");
    println!("  User agent: {}", config.transport.user_agent);
    println!(
        "  Timeout: {}s (connect: {}s)",
        config.transport.timeout_secs, config.transport.connect_timeout_secs
    );

    println!("\nCrawler:");
    println!(
        "  Max concurrent filter fetches: {}",
        config.crawler.max_concurrent_fetches
    );

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl (concurrency ceiling: {})",
        config.crawler.max_concurrent_fetches
    );

    match crawl(config).await {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
