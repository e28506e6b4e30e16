//! Configuration module for Page Harvest
//!
//! Settings come from built-in defaults, an optional TOML file and the process
//! environment, in increasing order of precedence.
//!
//! # Example
//!
//! ```no_run
//! use page_harvest::config::{apply_env_overrides, load_config};
//! use std::path::Path;
//!
//! let mut config = load_config(Path::new("harvest.toml")).unwrap();
//! apply_env_overrides(&mut config, |key| std::env::var(key).ok()).unwrap();
//! println!("Harvesting {}", config.target.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, TargetConfig, DEFAULT_BASE_URL};

// Re-export parser functions
pub use parser::{apply_env_overrides, load_config, ENV_BASE_URL, ENV_IMAGE_DIR, ENV_TEXT_DIR};
pub use validation::validate;
