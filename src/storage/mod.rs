//! Storage layer for option catalogues and saved selections.
//!
//! Persistence goes through the injected [`KeyValueStore`] trait; the catalogue
//! functions work against any backend.
//!
//! # Modules
//!
//! - `backend`: Key-value store trait and typed extension
//! - `json`: JSON file-based store
//! - `memory`: In-memory store
//! - `catalog`: Named option catalogues on top of a store
//! - `models`: Persisted record types separate from domain models

pub mod backend;
pub mod catalog;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::{KeyValueStore, KeyValueStoreExt};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use models::{OptionRecord, SelectionRecord};
