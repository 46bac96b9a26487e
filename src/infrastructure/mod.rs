//! Filesystem locations inside the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`; everything the plugin
//! persists lives below it.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
