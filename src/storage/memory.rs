//! In-memory storage
//!
//! Mirrors the local filesystem rules closely enough to exercise the pipeline
//! without touching disk: writes need an existing parent directory, and
//! individual paths can be made to fail.

use crate::storage::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    dirs: HashSet<PathBuf>,
    files: HashMap<PathBuf, Vec<u8>>,
    failing: HashSet<PathBuf>,
}

/// Storage that keeps everything in a map
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: Mutex<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes every subsequent write to `path` fail with a permission error
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.lock().failing.insert(path.into());
    }

    /// Returns the contents stored at `path`
    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.lock().files.get(path).cloned()
    }

    /// Returns true if `path` was created as a directory
    pub fn has_dir(&self, path: &Path) -> bool {
        self.lock().dirs.contains(path)
    }

    /// All stored file paths, sorted
    pub fn file_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.lock().files.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Returns true if nothing at all has been created
    pub fn is_empty(&self) -> bool {
        let inner = self.lock();
        inner.files.is_empty() && inner.dirs.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_dir_all(&self, path: &Path) -> StorageResult<()> {
        let mut inner = self.lock();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                inner.dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> StorageResult<()> {
        let mut inner = self.lock();

        let write_error = |kind: io::ErrorKind, message: &str| StorageError::Write {
            path: path.to_path_buf(),
            source: io::Error::new(kind, message.to_string()),
        };

        if inner.failing.contains(path) {
            return Err(write_error(io::ErrorKind::PermissionDenied, "write refused"));
        }

        let parent_exists = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => inner.dirs.contains(parent),
            _ => true,
        };
        if !parent_exists {
            return Err(write_error(
                io::ErrorKind::NotFound,
                "parent directory does not exist",
            ));
        }

        inner.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}
