//! Filesystem-based durable store.
//!
//! Stores each key as a single JSON file under a base directory. This is the
//! default backend for the command-line host.
//!
//! # Security
//!
//! - **Path traversal**: keys are validated before being turned into paths
//! - **File size limits**: values above [`MAX_FILE_SIZE`] are refused on read
//!
//! # Durability
//!
//! Writes go to a sibling temp file first and are then renamed over the
//! target, so a crash mid-write leaves either the old or the new value.

use crate::storage::traits::{DurableStore, validate_key};
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum size of a stored value (4 MiB).
pub const MAX_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Filesystem-based durable store.
#[derive(Debug, Clone)]
pub struct FilesystemStore {
    /// Base directory for storage.
    base_path: PathBuf,
}

impl FilesystemStore {
    /// Creates a new filesystem store.
    ///
    /// The directory is created lazily on first write.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Returns the path of the file holding `key`.
    fn value_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;

        let path = self.base_path.join(format!("{key}.json"));

        // validate_key already forbids separators; keep the prefix check as a
        // second barrier since the file may not exist yet for canonicalize.
        if !path.starts_with(&self.base_path) {
            return Err(Error::InvalidInput(format!(
                "Path traversal attempt detected for key: {key}",
            )));
        }

        Ok(path)
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl DurableStore for FilesystemStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let metadata = fs::metadata(&path).map_err(|e| Error::OperationFailed {
            operation: "read_file_metadata".to_string(),
            cause: e.to_string(),
        })?;

        if metadata.len() > MAX_FILE_SIZE {
            return Err(Error::InvalidInput(format!(
                "Stored value exceeds maximum size of {MAX_FILE_SIZE} bytes: {}",
                path.display()
            )));
        }

        let bytes = fs::read(&path).map_err(|e| Error::OperationFailed {
            operation: "read_value_file".to_string(),
            cause: e.to_string(),
        })?;

        let contents = String::from_utf8(bytes).map_err(|e| Error::MalformedDurableState {
            key: key.to_string(),
            cause: e.to_string(),
        })?;

        Ok(Some(contents))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;

        fs::create_dir_all(&self.base_path).map_err(|e| Error::OperationFailed {
            operation: "create_storage_dir".to_string(),
            cause: e.to_string(),
        })?;

        // Unique per write so concurrent writers never share a temp file.
        let tmp_path = self
            .base_path
            .join(format!(".{key}.{}.tmp", uuid::Uuid::new_v4().simple()));

        let replaced = fs::write(&tmp_path, value)
            .map_err(|e| Error::OperationFailed {
                operation: "write_value_file".to_string(),
                cause: e.to_string(),
            })
            .and_then(|()| {
                fs::rename(&tmp_path, &path).map_err(|e| Error::OperationFailed {
                    operation: "replace_value_file".to_string(),
                    cause: e.to_string(),
                })
            });

        if replaced.is_err() && tmp_path.exists() {
            let _ = fs::remove_file(&tmp_path);
        }
        replaced?;

        tracing::trace!(key, bytes = value.len(), "Wrote durable value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let path = self.value_path(key)?;

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).map_err(|e| Error::OperationFailed {
            operation: "delete_value_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(true)
    }

    fn describe(&self) -> String {
        format!("filesystem: {}", self.base_path.display())
    }
}
