//! Sumi-Fetch main entry point
//!
//! This is the command-line interface for the Sumi-Fetch batch fetcher.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_fetch::config::{load_config, Config, ConfigOverrides};
use sumi_fetch::crawler::Coordinator;
use tracing_subscriber::EnvFilter;

/// Sumi-Fetch: a concurrent batch page fetcher
///
/// Every URL is fetched concurrently and written to a file named after its
/// host and path. Records are printed as fetches complete; failures are
/// logged to stderr and never stop the other fetches.
#[derive(Parser, Debug)]
#[command(name = "sumi-fetch")]
#[command(version = "1.0.0")]
#[command(about = "A concurrent batch page fetcher", long_about = None)]
struct Cli {
    /// URLs (or bare host/path strings) to fetch
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Show metadata of calls
    #[arg(short, long)]
    metadata: bool,

    /// Retrieve assets together with webpage
    #[arg(short, long)]
    assets: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory fetched files are written under
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let overrides = ConfigOverrides {
        extract_metadata: cli.metadata,
        fetch_assets: cli.assets,
        output_dir: cli.output_dir.clone(),
        request_timeout_secs: cli.timeout,
    };
    overrides
        .apply(&mut config)
        .context("Invalid configuration")?;

    tracing::debug!(
        "Metadata: {}, assets: {}, timeout: {}s, output: {}",
        config.fetch.extract_metadata,
        config.fetch.fetch_assets,
        config.fetch.request_timeout_secs,
        config.output.directory
    );

    if cli.urls.is_empty() {
        tracing::warn!("No URLs given, nothing to fetch");
        return Ok(());
    }

    let coordinator = Coordinator::new(config).context("Failed to start fetch run")?;
    coordinator.run(&cli.urls).await?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout only carries the fetch records.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_fetch=info,warn"),
            1 => EnvFilter::new("sumi_fetch=debug,info"),
            2 => EnvFilter::new("sumi_fetch=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
