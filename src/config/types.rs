use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder page harvested when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://example.com/";

/// Main configuration structure for Page Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target: TargetConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// The page to harvest
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Absolute URL of the page to fetch
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// HTTP session settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total time allowed for a single request (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Time allowed to establish a connection (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("page-harvest/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the extracted page text
    #[serde(rename = "text-dir")]
    pub text_dir: PathBuf,

    /// Directory receiving downloaded images
    #[serde(rename = "image-dir")]
    pub image_dir: PathBuf,

    /// File name of the text output inside `text_dir`
    #[serde(rename = "text-file")]
    pub text_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            text_dir: PathBuf::from("output/text"),
            image_dir: PathBuf::from("output/images"),
            text_file: "main_page.txt".to_string(),
        }
    }
}
