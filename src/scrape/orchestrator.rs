//! Scrape orchestration
//!
//! Sequences one harvest: fetch the page, extract it, save the text, then
//! download every image concurrently and wait for all of them.

use crate::config::{Config, HttpConfig};
use crate::scrape::client::HttpClient;
use crate::scrape::events::{ScrapeEvent, ScrapeObserver, TracingObserver};
use crate::scrape::extract::extract;
use crate::scrape::images::{fetch_image, ImageOutcome};
use crate::scrape::resolve::build_image_tasks;
use crate::storage::{OutputLayout, Storage};
use crate::HarvestError;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// What a completed scrape produced
#[derive(Debug)]
pub struct ScrapeReport {
    /// The page that was harvested
    pub url: Url,

    /// Where the text was written
    pub text_path: PathBuf,

    /// Size of the written text in bytes
    pub text_bytes: usize,

    /// One outcome per image task, in document order
    pub images: Vec<ImageOutcome>,
}

impl ScrapeReport {
    pub fn images_saved(&self) -> usize {
        self.images.iter().filter(|o| o.is_saved()).count()
    }

    pub fn images_failed(&self) -> usize {
        self.images.len() - self.images_saved()
    }

    /// Outcomes of the image tasks that failed
    pub fn failures(&self) -> impl Iterator<Item = &ImageOutcome> {
        self.images.iter().filter(|o| !o.is_saved())
    }
}

/// Runs harvests against a storage backend
///
/// A `Scraper` holds configuration only. Each call to [`Scraper::scrape`] opens
/// its own HTTP session and closes it before returning.
pub struct Scraper {
    http: HttpConfig,
    layout: OutputLayout,
    storage: Arc<dyn Storage>,
    observer: Arc<dyn ScrapeObserver>,
}

impl Scraper {
    /// Creates a scraper writing through `storage`, logging with `tracing`
    pub fn new(config: &Config, storage: Arc<dyn Storage>) -> Self {
        Self {
            http: config.http.clone(),
            layout: OutputLayout::from_config(&config.output),
            storage,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replaces the event observer
    pub fn with_observer(mut self, observer: Arc<dyn ScrapeObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Replaces the output layout
    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Harvests one page
    ///
    /// # Errors
    ///
    /// Fetching the page, creating the output directories and writing the text
    /// are fatal and returned as errors. Image failures never are; they are
    /// reported in [`ScrapeReport::images`].
    pub async fn scrape(&self, base_url: &Url) -> Result<ScrapeReport, HarvestError> {
        let storage = self.storage.as_ref();
        let observer = self.observer.as_ref();

        let client = HttpClient::new(&self.http).map_err(|source| HarvestError::Network {
            url: base_url.to_string(),
            source,
        })?;

        // Fetch the page
        observer.on_event(&ScrapeEvent::FetchStarted { url: base_url });
        let page = match client.fetch_page(base_url).await {
            Ok(page) => page,
            Err(error) => {
                observer.on_event(&ScrapeEvent::FetchFailed {
                    url: base_url,
                    error: &error,
                    fatal: true,
                });
                return Err(error);
            }
        };
        observer.on_event(&ScrapeEvent::FetchSucceeded {
            url: base_url,
            bytes: page.html.len(),
        });

        let content = extract(&page.html);
        tracing::debug!(
            "Extracted {} bytes of text and {} image references from {}",
            content.text.len(),
            content.image_refs.len(),
            page.url
        );

        // Nothing touches storage before the page is in hand
        self.layout.prepare(storage).await?;

        let text_path = self.layout.text_path();
        storage.write(&text_path, content.text.as_bytes()).await?;
        observer.on_event(&ScrapeEvent::TextSaved {
            path: &text_path,
            bytes: content.text.len(),
        });

        let tasks = build_image_tasks(&page.url, &content.image_refs, &self.layout);
        tracing::debug!("Downloading {} images", tasks.len());

        let images = join_all(
            tasks
                .into_iter()
                .map(|task| fetch_image(&client, storage, observer, task)),
        )
        .await;

        let report = ScrapeReport {
            url: page.url,
            text_path,
            text_bytes: content.text.len(),
            images,
        };

        observer.on_event(&ScrapeEvent::ScrapeFinished {
            url: &report.url,
            images_saved: report.images_saved(),
            images_failed: report.images_failed(),
        });

        Ok(report)
    }
}
