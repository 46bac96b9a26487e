//! Storage record models for the option catalogue.
//!
//! These are the persisted shapes of options and selections. They are kept apart
//! from the domain types so the on-disk format can carry bookkeeping fields
//! (timestamps) the engine never sees.

use crate::domain::{ComboOption, OptionValue};
use serde::{Deserialize, Serialize};

/// A persisted catalogue option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub value: OptionValue,
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default)]
    pub disabled: bool,

    /// Unix timestamp when the option was added to the catalogue.
    pub created_at: i64,
}

impl OptionRecord {
    /// Creates an enabled, ungrouped record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use artisan_combobox::storage::OptionRecord;
    ///
    /// let record = OptionRecord::new("raku", "Raku");
    /// assert!(record.group.is_none());
    /// assert!(record.created_at > 0);
    /// ```
    pub fn new(value: impl Into<OptionValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
            group: None,
            disabled: false,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<OptionRecord> for ComboOption {
    fn from(record: OptionRecord) -> Self {
        Self {
            value: record.value,
            label: record.label,
            description: record.description,
            disabled: record.disabled,
            group: record.group,
        }
    }
}

/// A persisted selection of a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// Selected values in selection order.
    pub values: Vec<OptionValue>,

    /// Unix timestamp of the last save.
    pub saved_at: i64,
}

impl SelectionRecord {
    pub fn new(values: Vec<OptionValue>) -> Self {
        Self {
            values,
            saved_at: chrono::Utc::now().timestamp(),
        }
    }
}
