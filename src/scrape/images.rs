//! Image fetching
//!
//! Downloads a single image and writes it to storage. Every error is caught
//! here and turned into an `ImageOutcome::Failed`, so one broken image never
//! affects the others.

use crate::scrape::client::HttpClient;
use crate::scrape::events::{ScrapeEvent, ScrapeObserver};
use crate::scrape::resolve::ImageTask;
use crate::storage::Storage;
use crate::HarvestError;
use std::path::{Path, PathBuf};
use url::Url;

/// Result of one image task
#[derive(Debug)]
pub enum ImageOutcome {
    /// The image was written in full
    Saved {
        url: Url,
        path: PathBuf,
        bytes: usize,
    },

    /// The image was skipped; nothing was written
    Failed {
        url: Url,
        path: PathBuf,
        error: HarvestError,
    },
}

impl ImageOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    /// The source URL of the image
    pub fn url(&self) -> &Url {
        match self {
            Self::Saved { url, .. } | Self::Failed { url, .. } => url,
        }
    }

    /// The destination the image was, or would have been, written to
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Saved { path, .. } | Self::Failed { path, .. } => path,
        }
    }

    /// The failure reason, if the task failed
    pub fn error(&self) -> Option<&HarvestError> {
        match self {
            Self::Saved { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

/// Downloads one image and saves it to its destination
///
/// Never returns an error: network, HTTP and storage failures all become
/// `ImageOutcome::Failed` and are reported to the observer.
pub async fn fetch_image(
    client: &HttpClient,
    storage: &dyn Storage,
    observer: &dyn ScrapeObserver,
    task: ImageTask,
) -> ImageOutcome {
    let ImageTask {
        source_url: url,
        destination: path,
    } = task;

    observer.on_event(&ScrapeEvent::FetchStarted { url: &url });

    let result = download(client, storage, observer, &url, &path).await;

    match result {
        Ok(bytes) => {
            observer.on_event(&ScrapeEvent::ImageSaved {
                url: &url,
                path: &path,
                bytes,
            });
            ImageOutcome::Saved { url, path, bytes }
        }
        Err(error) => {
            observer.on_event(&ScrapeEvent::ImageFailed {
                url: &url,
                path: &path,
                error: &error,
            });
            ImageOutcome::Failed { url, path, error }
        }
    }
}

async fn download(
    client: &HttpClient,
    storage: &dyn Storage,
    observer: &dyn ScrapeObserver,
    url: &Url,
    path: &Path,
) -> Result<usize, HarvestError> {
    let body = match client.fetch_bytes(url).await {
        Ok(body) => body,
        Err(error) => {
            observer.on_event(&ScrapeEvent::FetchFailed {
                url,
                error: &error,
                fatal: false,
            });
            return Err(error);
        }
    };

    observer.on_event(&ScrapeEvent::FetchSucceeded {
        url,
        bytes: body.len(),
    });

    storage.write(path, &body).await?;
    Ok(body.len())
}
