//! Notifications emitted by the combobox for the host to act on.
//!
//! The event handler returns a `Vec<Action>` after processing each event. Each
//! action is emitted at most once per user action; executing them (persisting a
//! selection, refetching options, creating a record) is the host's business.
//!
//! # Example
//!
//! ```rust
//! use artisan_combobox::combobox::Action;
//!
//! let actions = vec![Action::CreateRequested("Raku pottery".to_string())];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::domain::SelectionValue;

/// Outputs of the widget (widget → host).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The user changed the selection.
    ///
    /// Carries the new value, or `None` when the selection was cleared.
    SelectionChanged(Option<SelectionValue>),

    /// The user edited the input text.
    ///
    /// Carries the raw query, for hosts that refetch options asynchronously.
    InputChanged(String),

    /// The user asked to create a new option from the trimmed query.
    CreateRequested(String),
}
