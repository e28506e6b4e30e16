//! Storage module for harvested content
//!
//! This module handles everything written to disk:
//! - The `Storage` trait the pipeline writes through
//! - A local filesystem backend with atomic writes
//! - An in-memory backend for tests
//! - The output layout and its explicit setup step

mod local;
mod memory;
mod traits;

pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::config::OutputConfig;
use std::path::{Path, PathBuf};

/// Where harvested text and images are placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    text_dir: PathBuf,
    image_dir: PathBuf,
    text_file: String,
}

impl OutputLayout {
    pub fn new(
        text_dir: impl Into<PathBuf>,
        image_dir: impl Into<PathBuf>,
        text_file: impl Into<String>,
    ) -> Self {
        Self {
            text_dir: text_dir.into(),
            image_dir: image_dir.into(),
            text_file: text_file.into(),
        }
    }

    /// Builds the layout described by the output configuration
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.text_dir, &config.image_dir, &config.text_file)
    }

    /// Places the default `text` and `images` directories under `root`
    pub fn under(root: &Path) -> Self {
        let defaults = OutputConfig::default();
        Self::new(
            root.join("text"),
            root.join("images"),
            defaults.text_file,
        )
    }

    pub fn text_dir(&self) -> &Path {
        &self.text_dir
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Path of the extracted text file
    pub fn text_path(&self) -> PathBuf {
        self.text_dir.join(&self.text_file)
    }

    /// Path an image with the given derived file name is saved to
    pub fn image_path(&self, file_name: &str) -> PathBuf {
        self.image_dir.join(file_name)
    }

    /// Creates the output directories if they are absent
    ///
    /// Kept separate from construction so that building a layout never touches
    /// storage.
    pub async fn prepare(&self, storage: &dyn Storage) -> StorageResult<()> {
        storage.create_dir_all(&self.text_dir).await?;
        storage.create_dir_all(&self.image_dir).await?;
        tracing::debug!(
            "Prepared output directories {} and {}",
            self.text_dir.display(),
            self.image_dir.display()
        );
        Ok(())
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::from_config(&OutputConfig::default())
    }
}
