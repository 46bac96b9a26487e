//! JSON file-based key-value store.
//!
//! This module provides a human-readable store holding every key in a single
//! JSON document. Writes are atomic (write-to-temp + rename) so a crash never
//! leaves a truncated file behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(log n), the whole document lives in memory
//! - **Write**: O(n), the whole document is re-serialized
//! - **Best for**: small catalogues and infrequent writes

use crate::domain::error::{PickerError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk document format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocument {
    /// Version of the document format for future migrations.
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, Value>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file store.
///
/// The document is loaded once on creation and persisted after every
/// modification. Any change that could not be flushed is retried on drop.
///
/// # Thread Safety
///
/// `Send` but not `Sync`; it is owned by the single worker thread.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "catalog/categories/options": [
///       { "value": "ceramics", "label": "Ceramics", "created_at": 1700000000 }
///     ]
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    data: StoreDocument,
    /// Set while in-memory data differs from the file.
    dirty: bool,
}

impl JsonFileStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file starts an empty store; nothing is written until the first
    /// modification.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but is not a valid store document
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use artisan_combobox::storage::JsonFileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::new(PathBuf::from("/tmp/artisan-combobox.json"))?;
    /// # Ok::<(), artisan_combobox::PickerError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StoreDocument::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "store initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreDocument> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreDocument = serde_json::from_str(&contents)
            .map_err(|e| PickerError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(version = data.version, entries = data.entries.len(), "loaded store document");
        Ok(data)
    }

    /// Persists the document with an atomic write, if it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| PickerError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let _span = tracing::debug_span!("json_get", key = %key).entered();

        let value = self.data.entries.get(key).cloned();
        tracing::trace!(found = value.is_some(), "lookup complete");
        Ok(value)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let _span = tracing::debug_span!("json_set", key = %key).entered();

        if self.data.entries.get(key) == Some(&value) {
            tracing::trace!("value unchanged");
            return Ok(());
        }

        self.data.entries.insert(key.to_string(), value);
        self.dirty = true;
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let _span = tracing::debug_span!("json_remove", key = %key).entered();

        if self.data.entries.remove(key).is_none() {
            return Ok(false);
        }

        self.dirty = true;
        self.flush()?;
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.entries.keys().cloned().collect())
    }
}

impl Drop for JsonFileStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.flush() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStoreExt;
    use tempfile::tempdir;

    #[test]
    fn missing_file_starts_empty_without_writing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = JsonFileStore::new(path.clone()).unwrap();
        assert!(store.keys().unwrap().is_empty());
        drop(store);

        assert!(!path.exists());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let mut store = JsonFileStore::new(path.clone()).unwrap();
            store.set_json("catalog/tags/selection", &vec!["raku", "stoneware"]).unwrap();
            store.set_json("scratch", &true).unwrap();
            assert!(store.remove("scratch").unwrap());
        }

        let store = JsonFileStore::new(path).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["catalog/tags/selection".to_string()]);
        assert_eq!(
            store.get_json::<Vec<String>>("catalog/tags/selection").unwrap(),
            Some(vec!["raku".to_string(), "stoneware".to_string()])
        );
    }

    #[test]
    fn writes_leave_no_temporary_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::new(path.clone()).unwrap();
        store.set_json("k", &1).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(path).unwrap_err();
        assert!(matches!(err, PickerError::Storage(_)));
    }
}
