//! Domain layer for the combobox.
//!
//! Core types shared by the engine, storage and UI layers, independent of Zellij
//! APIs or persistence concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`option`]: Selectable option model
//! - [`selection`]: Single/multiple selection model
//!
//! # Examples
//!
//! ```
//! use artisan_combobox::domain::{ComboOption, Selection};
//!
//! let option = ComboOption::new("apple", "Apple");
//! let selection = Selection::Multiple(vec![option.value.clone()]);
//! assert!(selection.contains(&option.value));
//! ```

pub mod error;
pub mod option;
pub mod selection;

pub use error::{PickerError, Result};
pub use option::{ComboOption, OptionValue};
pub use selection::{Selection, SelectionValue};
