//! Error types for the combobox engine and its host plugin.
//!
//! This module defines the centralized error type [`PickerError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. The filtering and
//! selection logic itself is total; errors only arise at the edges (option intake,
//! storage, configuration, worker messaging).

use thiserror::Error;

/// The main error type for combobox and picker operations.
///
/// # Examples
///
/// ```
/// use artisan_combobox::PickerError;
///
/// fn validate_catalog(name: &str) -> Result<(), PickerError> {
///     if name.is_empty() {
///         return Err(PickerError::Config("catalog name is empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_catalog("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum PickerError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to a key-value store fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The host supplied an option list in which two options share a value.
    ///
    /// The widget keeps its previous option list when this is returned.
    #[error("Duplicate option value: {0}")]
    DuplicateOptionValue(String),
}

/// A specialized `Result` type for picker operations.
pub type Result<T> = std::result::Result<T, PickerError>;
