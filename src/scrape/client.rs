//! HTTP client wrapper
//!
//! Issues GET requests, enforces a success status and returns the fully
//! buffered body. Nothing is retried or cached here; callers decide what a
//! failure means.

use crate::config::HttpConfig;
use crate::HarvestError;
use reqwest::{Client, Response};
use url::Url;

/// A downloaded page, held only until it has been extracted
#[derive(Debug, Clone)]
pub struct Page {
    /// The URL the page was requested from
    pub url: Url,

    /// Raw HTML body
    pub html: String,
}

/// One HTTP session shared by every request of a scrape
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

/// Builds the underlying reqwest client
///
/// Redirects are followed with reqwest's default policy.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

impl HttpClient {
    /// Opens a new session with the given settings
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::from_client(build_http_client(config)?))
    }

    /// Wraps an already configured reqwest client
    pub fn from_client(inner: Client) -> Self {
        Self { inner }
    }

    /// Fetches the HTML of a page
    pub async fn fetch_page(&self, url: &Url) -> Result<Page, HarvestError> {
        let html = self.fetch_text(url).await?;
        Ok(Page {
            url: url.clone(),
            html,
        })
    }

    /// Fetches `url` and decodes the body as text
    ///
    /// The charset from the Content-Type header is honoured, UTF-8 otherwise.
    pub async fn fetch_text(&self, url: &Url) -> Result<String, HarvestError> {
        let response = self.get(url).await?;
        response.text().await.map_err(|e| network_error(url, e))
    }

    /// Fetches `url` and returns the raw body
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, HarvestError> {
        let response = self.get(url).await?;
        let body = response.bytes().await.map_err(|e| network_error(url, e))?;
        Ok(body.to_vec())
    }

    /// Sends the request and rejects non-2xx responses
    async fn get(&self, url: &Url) -> Result<Response, HarvestError> {
        let response = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(|e| network_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

fn network_error(url: &Url, source: reqwest::Error) -> HarvestError {
    HarvestError::Network {
        url: url.to_string(),
        source,
    }
}
