//! Key-value store abstraction.
//!
//! This module defines the [`KeyValueStore`] trait the plugin persists through.
//! Nothing above this layer knows which backend is in use: the worker receives
//! a `Box<dyn KeyValueStore>` and the catalogue functions accept any store.
//!
//! # Design Philosophy
//!
//! The trait stays minimal (get, set, remove, keys) over JSON values. Typed
//! access lives in the blanket [`KeyValueStoreExt`] extension so every backend,
//! including trait objects, gets it for free.

use crate::domain::error::{PickerError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Abstraction over persistent key-value backends.
///
/// # Implementations
///
/// - [`crate::storage::JsonFileStore`]: single JSON document with atomic writes
/// - [`crate::storage::MemoryStore`]: in-process map, for tests and ephemeral use
///
/// # Examples
///
/// ```
/// use artisan_combobox::storage::{KeyValueStore, KeyValueStoreExt, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set_json("greeting", &"hello")?;
/// assert_eq!(store.get_json::<String>("greeting")?.as_deref(), Some("hello"));
/// assert_eq!(store.keys()?, vec!["greeting".to_string()]);
/// # Ok::<(), artisan_combobox::PickerError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be persisted.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Removes `key`. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<bool>;

    /// Returns all keys in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Typed access on top of any [`KeyValueStore`].
pub trait KeyValueStoreExt: KeyValueStore {
    /// Deserializes the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Serialization`] if the stored value does not have
    /// the expected shape.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)?
            .map(|value| {
                serde_json::from_value(value)
                    .map_err(|e| PickerError::Serialization(format!("failed to decode {key}: {e}")))
            })
            .transpose()
    }

    /// Serializes `value` and stores it under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Serialization`] if encoding fails, or the backend's
    /// write error.
    fn set_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| PickerError::Serialization(format!("failed to encode {key}: {e}")))?;
        self.set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
