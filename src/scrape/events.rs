//! Scrape events and observers
//!
//! The pipeline reports what it does through a `ScrapeObserver` instead of
//! logging directly, so a host can route events wherever it likes. The default
//! `TracingObserver` turns them into `tracing` lines.

use std::path::Path;
use url::Url;

/// Something that happened during a scrape
#[derive(Debug, Clone, Copy)]
pub enum ScrapeEvent<'a> {
    /// A request is about to be sent
    FetchStarted { url: &'a Url },

    /// A request completed with a success status
    FetchSucceeded { url: &'a Url, bytes: usize },

    /// A request failed; `fatal` is true only for the page itself
    FetchFailed {
        url: &'a Url,
        error: &'a crate::HarvestError,
        fatal: bool,
    },

    /// The extracted text was written
    TextSaved { path: &'a Path, bytes: usize },

    /// An image was written
    ImageSaved {
        url: &'a Url,
        path: &'a Path,
        bytes: usize,
    },

    /// An image task failed and was skipped
    ImageFailed {
        url: &'a Url,
        path: &'a Path,
        error: &'a crate::HarvestError,
    },

    /// Every image task has completed
    ScrapeFinished {
        url: &'a Url,
        images_saved: usize,
        images_failed: usize,
    },
}

/// Receives scrape events
///
/// Called concurrently from image tasks, so implementations must be `Sync`.
pub trait ScrapeObserver: Send + Sync {
    fn on_event(&self, event: &ScrapeEvent<'_>);
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScrapeObserver for NoopObserver {
    fn on_event(&self, _event: &ScrapeEvent<'_>) {}
}

/// Observer that logs events with `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScrapeObserver for TracingObserver {
    fn on_event(&self, event: &ScrapeEvent<'_>) {
        match *event {
            ScrapeEvent::FetchStarted { url } => {
                tracing::info!("Fetching URL: {}", url);
            }
            ScrapeEvent::FetchSucceeded { url, bytes } => {
                tracing::info!("Fetched {} ({} bytes)", url, bytes);
            }
            ScrapeEvent::FetchFailed {
                url,
                error,
                fatal: true,
            } => {
                tracing::error!(kind = error.kind(), "Failed to fetch {}: {}", url, error);
            }
            ScrapeEvent::FetchFailed { url, error, .. } => {
                tracing::debug!(kind = error.kind(), "Request to {} failed: {}", url, error);
            }
            ScrapeEvent::TextSaved { path, bytes } => {
                tracing::info!("Text saved to {} ({} bytes)", path.display(), bytes);
            }
            ScrapeEvent::ImageSaved { url, path, .. } => {
                tracing::info!("Saved image {} to {}", url, path.display());
            }
            ScrapeEvent::ImageFailed { url, error, .. } => {
                tracing::warn!(kind = error.kind(), "Failed to download image {}: {}", url, error);
            }
            ScrapeEvent::ScrapeFinished {
                url,
                images_saved,
                images_failed,
            } => {
                tracing::info!(
                    "Scraping of {} finished: {} images saved, {} failed",
                    url,
                    images_saved,
                    images_failed
                );
            }
        }
    }
}
