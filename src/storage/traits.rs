//! Storage traits and error types
//!
//! This module defines the trait interface for the places harvested content is
//! written to, and the associated error type.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// The path the failed operation targeted
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::CreateDir { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Implementations must be shareable across concurrently running image tasks.
/// Every write replaces the whole target; a failed write leaves no partial file
/// behind.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Creates a directory and all of its missing parents
    ///
    /// Succeeds if the directory already exists.
    async fn create_dir_all(&self, path: &Path) -> StorageResult<()>;

    /// Writes `contents` to `path`, replacing any existing file
    ///
    /// The parent directory must already exist.
    async fn write(&self, path: &Path, contents: &[u8]) -> StorageResult<()>;
}
