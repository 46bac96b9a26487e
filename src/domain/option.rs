//! Selectable option model.
//!
//! A [`ComboOption`] is one entry the host offers to the combobox. Its identity is
//! its [`OptionValue`]; its `label` is the text used for default filtering and the
//! text copied into the input when the option is picked in single mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an option.
///
/// Serialized transparently as a plain string so catalogues stay human-readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionValue(String);

impl OptionValue {
    /// Creates a value from anything string-like.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A selectable entry with a value, label and optional metadata.
///
/// # Examples
///
/// ```
/// use artisan_combobox::ComboOption;
///
/// let option = ComboOption::new("ceramics", "Ceramics")
///     .with_description("Wheel-thrown and hand-built pottery")
///     .with_group("Home");
///
/// assert_eq!(option.value.as_str(), "ceramics");
/// assert_eq!(option.group.as_deref(), Some("Home"));
/// assert!(!option.disabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboOption {
    pub value: OptionValue,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl ComboOption {
    /// Creates an enabled, ungrouped option without description.
    pub fn new(value: impl Into<OptionValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
            disabled: false,
            group: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Marks the option as disabled: it is still listed but cannot be picked.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}
