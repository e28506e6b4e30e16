use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Environment variable overriding the page to harvest
pub const ENV_BASE_URL: &str = "BASE_URL";

/// Environment variable overriding the text output directory
pub const ENV_TEXT_DIR: &str = "OUTPUT_TEXT_DIR";

/// Environment variable overriding the image output directory
pub const ENV_IMAGE_DIR: &str = "OUTPUT_IMAGE_DIR";

/// Loads and parses a configuration file from the given path
///
/// Missing keys fall back to their defaults, so an empty file is a valid
/// configuration.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Applies environment overrides on top of an existing configuration
///
/// `lookup` resolves a variable name to its value; the binary passes
/// `std::env::var`, tests pass a map. Empty values are ignored. The result is
/// validated again since overrides may break it.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = lookup(ENV_BASE_URL) {
        config.target.base_url = base_url.trim().to_string();
    }

    if let Some(dir) = lookup(ENV_TEXT_DIR) {
        config.output.text_dir = PathBuf::from(dir);
    }

    if let Some(dir) = lookup(ENV_IMAGE_DIR) {
        config.output.image_dir = PathBuf::from(dir);
    }

    validate(config)
}
