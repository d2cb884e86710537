//! Onion-Digger main entry point
//!
//! This is the command-line interface for the Onion-Digger crawler.

use anyhow::Context;
use clap::{Parser, Subcommand};
use onion_digger::config::{load_config_with_hash, Config};
use onion_digger::output::{
    generate_markdown_summary, generate_summary, print_statistics, save_pages, write_records_json,
};
use onion_digger::{Digger, TorDaemon, TorSessionProvider};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Onion-Digger: a keyword-driven onion-service crawler
///
/// Onion-Digger crawls sites through a Tor SOCKS proxy, starting from a seed URL
/// or a search-engine query, and follows only the links that contain a keyword.
#[derive(Parser, Debug)]
#[command(name = "onion-digger")]
#[command(version)]
#[command(about = "A keyword-driven onion-service crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Launch a Tor daemon on the configured port for the duration of the crawl
    #[arg(long, conflicts_with = "no_proxy")]
    start_tor: bool,

    /// Fetch directly instead of through the SOCKS proxy
    #[arg(long)]
    no_proxy: bool,

    /// Print crawl statistics when the crawl finishes
    #[arg(long)]
    stats: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl outward from a seed URL
    Dig {
        /// URL to start from
        url: String,

        /// Only links containing this keyword are followed
        keyword: String,
    },

    /// Query the configured search engine and crawl from its results page
    Search {
        /// Search term, also used as the link filter
        keyword: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            (Config::default(), None)
        }
    };

    let mut daemon = if cli.start_tor {
        let mut daemon = TorDaemon::from_config(&config.proxy);
        daemon.start().context("failed to start Tor daemon")?;
        tracing::info!("{}", daemon);
        Some(daemon)
    } else {
        None
    };

    let result = run_crawl(&cli, &config, config_hash).await;

    if let Some(daemon) = daemon.as_mut() {
        tracing::info!("{}", daemon);
        if let Err(e) = daemon.kill() {
            tracing::warn!("Failed to stop Tor daemon: {}", e);
        }
    }

    result
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("onion_digger=info,warn"),
            1 => EnvFilter::new("onion_digger=debug,info"),
            2 => EnvFilter::new("onion_digger=trace,debug"),
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

/// Runs the requested crawl and writes the configured outputs
async fn run_crawl(cli: &Cli, config: &Config, config_hash: Option<String>) -> anyhow::Result<()> {
    let provider = if cli.no_proxy {
        tracing::warn!("Proxy disabled; requests go out directly");
        TorSessionProvider::without_proxy(
            Duration::from_secs(config.proxy.request_timeout),
            Duration::from_secs(config.proxy.connect_timeout),
        )
    } else {
        TorSessionProvider::from_config(&config.proxy)
    };

    let digger = Digger::from_config(provider, config);

    match &cli.command {
        Command::Dig { url, keyword } => digger.dig(url, keyword).await,
        Command::Search { keyword } => digger
            .search(keyword)
            .await
            .context("search could not be started")?,
    }

    tracing::info!("{}", digger);

    write_outputs(&digger, config, config_hash, cli.stats)
}

/// Writes pages, records, and the summary to whichever paths are configured
fn write_outputs(
    digger: &Digger<TorSessionProvider>,
    config: &Config,
    config_hash: Option<String>,
    show_stats: bool,
) -> anyhow::Result<()> {
    let records = digger.records();

    if let Some(dir) = &config.output.pages_dir {
        save_pages(&records, Path::new(dir))
            .with_context(|| format!("failed to save pages to {}", dir))?;
    }

    if let Some(path) = &config.output.records_path {
        write_records_json(&records, Path::new(path))
            .with_context(|| format!("failed to write records to {}", path))?;
    }

    let summary = generate_summary(digger, config_hash);

    if let Some(path) = &config.output.summary_path {
        generate_markdown_summary(&summary, Path::new(path))
            .with_context(|| format!("failed to write summary to {}", path))?;
        tracing::info!("Summary written to {}", path);
    }

    if show_stats {
        print_statistics(&summary.stats);
    }

    Ok(())
}
