//! Selection model for single and multiple mode.
//!
//! [`Selection`] is what the widget holds; [`SelectionValue`] is what it reports
//! to the host. A cleared selection is reported as `None`.

use super::option::OptionValue;
use serde::{Deserialize, Serialize};

/// The value(s) currently chosen by the user.
///
/// In multiple mode the order is selection order, never option order, and the
/// sequence never contains duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Single(Option<OptionValue>),
    Multiple(Vec<OptionValue>),
}

impl Selection {
    /// Returns whether `value` is part of the selection.
    #[must_use]
    pub fn contains(&self, value: &OptionValue) -> bool {
        match self {
            Self::Single(current) => current.as_ref() == Some(value),
            Self::Multiple(values) => values.contains(value),
        }
    }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(current) => current.is_none(),
            Self::Multiple(values) => values.is_empty(),
        }
    }

    /// Returns the selected values in selection order.
    #[must_use]
    pub fn values(&self) -> Vec<OptionValue> {
        match self {
            Self::Single(current) => current.iter().cloned().collect(),
            Self::Multiple(values) => values.clone(),
        }
    }

    /// Converts the selection to the value reported to the host.
    ///
    /// An empty single selection becomes `None`; a multiple selection is always
    /// reported as a (possibly empty) list.
    #[must_use]
    pub fn to_value(&self) -> Option<SelectionValue> {
        match self {
            Self::Single(current) => current.clone().map(SelectionValue::Single),
            Self::Multiple(values) => Some(SelectionValue::Multiple(values.clone())),
        }
    }
}

/// Selection payload carried by a selection-changed notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionValue {
    Single(OptionValue),
    Multiple(Vec<OptionValue>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_single_reports_none() {
        assert_eq!(Selection::Single(None).to_value(), None);
        assert!(Selection::Single(None).is_empty());
    }

    #[test]
    fn multiple_keeps_selection_order() {
        let selection = Selection::Multiple(vec!["cherry".into(), "apple".into()]);
        assert_eq!(selection.values(), vec![OptionValue::from("cherry"), OptionValue::from("apple")]);
        assert!(selection.contains(&"apple".into()));
        assert!(!selection.contains(&"banana".into()));
    }
}
