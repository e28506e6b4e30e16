//! Local filesystem storage
//!
//! Writes go to a temporary sibling file which is then renamed over the target,
//! so readers never observe a half-written file.

use crate::storage::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

// Distinguishes temp files of concurrent writes into the same directory
static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Storage backed by the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    /// Builds the temporary path used while writing `target`
    ///
    /// The name does not embed the target's, so any name the target can have
    /// also fits in the temp file's directory entry.
    fn temp_path(&self, target: &Path) -> PathBuf {
        let seq = TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        target.with_file_name(format!(".harvest-{}-{}.part", std::process::id(), seq))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn create_dir_all(&self, path: &Path) -> StorageResult<()> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> StorageResult<()> {
        let temp = self.temp_path(path);

        let result = match tokio::fs::write(&temp, contents).await {
            Ok(()) => tokio::fs::rename(&temp, path).await,
            Err(e) => Err(e),
        };

        if let Err(source) = result {
            // Best effort; the temp file may not exist
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(StorageError::Write {
                path: path.to_path_buf(),
                source,
            });
        }

        Ok(())
    }
}
