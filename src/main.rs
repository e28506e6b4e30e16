//! Page Harvest main entry point
//!
//! This is the command-line interface for the Page Harvest single-page scraper.

use anyhow::Context;
use clap::Parser;
use page_harvest::config::{apply_env_overrides, load_config, Config};
use page_harvest::scrape::scrape;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Page Harvest: save a web page's text and images
///
/// Fetches the page named by BASE_URL (or the config file), writes its visible
/// text to output/text/main_page.txt and downloads every image it references
/// into output/images/.
#[derive(Parser, Debug)]
#[command(name = "page-harvest")]
#[command(version)]
#[command(about = "Save a web page's text and images", long_about = None)]
struct Cli {
    /// Optional path to a TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Harvest failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_harvest=info,warn"),
            1 => EnvFilter::new("page_harvest=debug,info"),
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

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    let report = scrape(&config)
        .await
        .with_context(|| format!("Failed to harvest {}", config.target.base_url))?;

    // Image failures were already logged as they happened
    println!(
        "Saved text to {} ({} images saved, {} failed)",
        report.text_path.display(),
        report.images_saved(),
        report.images_failed()
    );

    Ok(())
}

/// Builds the configuration from defaults, the optional file, `.env` and the
/// process environment
fn resolve_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let mut config = match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())
        .context("Invalid configuration from environment")?;

    tracing::debug!("Target page: {}", config.target.base_url);
    Ok(config)
}
