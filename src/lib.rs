//! Page Harvest: a single-page text and image harvester
//!
//! This crate fetches one web page, saves its visible text and downloads every
//! image it references. Image downloads run concurrently and fail independently;
//! only failures on the page itself abort a run.

pub mod config;
pub mod scrape;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Page Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error for {url}: status {status}")]
    Http { url: String, status: u16 },

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] storage::StorageError),

    #[error("HTML parse error for {url}: {message}")]
    Parse { url: String, message: String },
}

impl HarvestError {
    /// Returns the URL the error is about, if it concerns a remote resource
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Network { url, .. } | Self::Http { url, .. } | Self::Parse { url, .. } => {
                Some(url)
            }
            Self::Config(_) | Self::Filesystem(_) => None,
        }
    }

    /// Returns the local path the error is about, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Filesystem(e) => Some(e.path()),
            _ => None,
        }
    }

    /// Short machine-friendly name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network { .. } => "network",
            Self::Http { .. } => "http",
            Self::Filesystem(_) => "filesystem",
            Self::Parse { .. } => "parse",
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Page Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use scrape::{ImageOutcome, ScrapeReport, Scraper};
pub use storage::{LocalStorage, OutputLayout, Storage};
