//! Pagesift main entry point
//!
//! Command-line interface for the Pagesift crawler: run a one-shot crawl or
//! serve the HTTP API.

use anyhow::Context;
use clap::{Parser, Subcommand};
use pagesift::config::{load_config_with_hash, Config};
use pagesift::crawler::crawl;
use pagesift::renderer::WebDriverRenderer;
use pagesift::server::run_server;
use pagesift::storage::{CsvSink, RecordSink};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagesift: a bounded, same-origin web crawler
///
/// Pagesift renders pages through a headless browser, extracts structured
/// content, follows same-site links, and persists one CSV record per visited
/// page.
#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(version = "1.0.0")]
#[command(about = "A bounded, same-origin web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a site starting from a seed URL and append records to the sink
    Crawl {
        /// Seed URL to start from
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Run the HTTP API server
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    match cli.command {
        Command::Crawl { url } => handle_crawl(config, &url).await?,
        Command::Serve => run_server(config).await?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagesift=info,warn"),
            1 => EnvFilter::new("pagesift=debug,info"),
            2 => EnvFilter::new("pagesift=trace,debug"),
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

/// Handles the one-shot crawl command
async fn handle_crawl(config: Config, seed_url: &str) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {} (budget: {} pages, renderer: {})",
        seed_url,
        config.crawler.page_budget,
        config.renderer.webdriver_url
    );

    let renderer = WebDriverRenderer::new(&config.renderer.webdriver_url);
    let records = crawl(&config, &renderer, seed_url).await?;

    let mut sink = CsvSink::new(&config.storage.csv_path);
    sink.append(&records)?;

    println!("Scraped {} pages", records.len());
    for record in &records {
        println!("  [{}] {}", record.status, record.url);
    }
    println!("Records appended to {}", config.storage.csv_path);

    Ok(())
}
