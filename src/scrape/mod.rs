//! Scrape module for harvesting a single page
//!
//! This module contains the whole pipeline:
//! - HTTP fetching with status checking
//! - Text and image reference extraction
//! - Image reference resolution and file naming
//! - Isolated, concurrent image downloads
//! - Orchestration and event reporting

mod client;
mod events;
mod extract;
mod images;
mod orchestrator;
mod resolve;

pub use client::{build_http_client, HttpClient, Page};
pub use events::{NoopObserver, ScrapeEvent, ScrapeObserver, TracingObserver};
pub use extract::{extract, ExtractedContent};
pub use images::{fetch_image, ImageOutcome};
pub use orchestrator::{ScrapeReport, Scraper};
pub use resolve::{build_image_tasks, derive_filename, resolve, ImageTask};

use crate::config::Config;
use crate::storage::LocalStorage;
use crate::{ConfigError, HarvestError};
use std::sync::Arc;
use url::Url;

/// Harvests the configured page onto the local filesystem
///
/// This is the main entry point. It will:
/// 1. Fetch the page at `config.target.base_url`
/// 2. Save its visible text
/// 3. Download all of its images concurrently
///
/// Progress is logged through `tracing`.
///
/// # Returns
///
/// * `Ok(ScrapeReport)` - The page was saved; some images may have failed
/// * `Err(HarvestError)` - The page itself could not be fetched or saved
pub async fn scrape(config: &Config) -> Result<ScrapeReport, HarvestError> {
    let base_url = Url::parse(&config.target.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", config.target.base_url, e))
    })?;

    tracing::info!("Starting scraping process");
    let scraper = Scraper::new(config, Arc::new(LocalStorage::new()));
    let report = scraper.scrape(&base_url).await?;
    tracing::info!("Scraping finished");

    Ok(report)
}
