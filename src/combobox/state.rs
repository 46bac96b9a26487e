//! Combobox state and its transitions.
//!
//! [`Combobox`] owns the widget-local state (query, highlight cursor, open state
//! and its outside-click listener) and a copy of the host-owned inputs (options,
//! selection, configuration). The cached [`VisibleResults`] are recomputed after
//! every change to any input of the filter, mirroring how the renderer reads them.
//!
//! # Controlled and uncontrolled selection
//!
//! An uncontrolled combobox applies its own selection changes. A controlled one
//! only reports them; the displayed selection changes when the host pushes a new
//! value with [`Combobox::set_selection`].
//!
//! # Example
//!
//! ```rust
//! use artisan_combobox::combobox::{Combobox, ComboboxConfig};
//! use artisan_combobox::domain::ComboOption;
//!
//! let combobox = Combobox::new(
//!     ComboboxConfig::default(),
//!     vec![ComboOption::new("apple", "Apple")],
//! )?;
//! assert!(!combobox.is_open());
//! assert_eq!(combobox.highlighted_index(), None);
//! # Ok::<(), artisan_combobox::PickerError>(())
//! ```

use super::actions::Action;
use super::config::ComboboxConfig;
use super::filter::{filter_options, VisibleEntry, VisibleResults};
use super::listener::OutsideClickListener;
use crate::domain::{ComboOption, OptionValue, PickerError, Result, Selection};
use std::collections::HashSet;

/// Snapshot of the state an assistive technology or renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessibilityState {
    /// Whether the dropdown is open.
    pub expanded: bool,
    /// Highlighted entry, if any.
    pub active_index: Option<usize>,
    /// Whether the input is disabled.
    pub disabled: bool,
    pub multiselectable: bool,
    /// Number of addressable entries, create entry included.
    pub entry_count: usize,
}

/// Headless combobox: filter and selection engine.
#[derive(Debug)]
pub struct Combobox {
    config: ComboboxConfig,
    options: Vec<ComboOption>,
    selection: Selection,
    controlled: bool,
    query: String,
    highlight: Option<usize>,
    /// Present exactly while the dropdown is open.
    listener: Option<OutsideClickListener>,
    focused: bool,
    results: VisibleResults,
}

impl Combobox {
    /// Creates an uncontrolled combobox with an empty selection.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::DuplicateOptionValue`] if two options share a value.
    pub fn new(config: ComboboxConfig, options: Vec<ComboOption>) -> Result<Self> {
        let selection = if config.is_multiple() {
            Selection::Multiple(vec![])
        } else {
            Selection::Single(None)
        };
        Self::build(config, options, selection, false)
    }

    /// Creates a controlled combobox showing `selection`.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::DuplicateOptionValue`] if two options share a value.
    pub fn controlled(config: ComboboxConfig, options: Vec<ComboOption>, selection: Selection) -> Result<Self> {
        Self::build(config, options, selection, true)
    }

    fn build(config: ComboboxConfig, options: Vec<ComboOption>, selection: Selection, controlled: bool) -> Result<Self> {
        ensure_unique_values(&options)?;

        let selection = normalize_selection(selection, &config);
        let mut combobox = Self {
            config,
            options,
            selection,
            controlled,
            query: String::new(),
            highlight: None,
            listener: None,
            focused: false,
            results: VisibleResults::default(),
        };
        combobox.refresh_results();
        Ok(combobox)
    }

    #[must_use]
    pub const fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    #[must_use]
    pub fn options(&self) -> &[ComboOption] {
        &self.options
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Highlighted entry index, `None` when nothing is highlighted.
    #[must_use]
    pub const fn highlighted_index(&self) -> Option<usize> {
        self.highlight
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.listener.is_some()
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Returns whether an outside-click listener is currently attached.
    #[must_use]
    pub const fn is_listening_outside(&self) -> bool {
        self.listener.is_some()
    }

    /// Entries the dropdown currently lists.
    #[must_use]
    pub const fn results(&self) -> &VisibleResults {
        &self.results
    }

    /// Looks up an option by value in the supplied option list.
    #[must_use]
    pub fn option(&self, value: &OptionValue) -> Option<&ComboOption> {
        self.options.iter().find(|o| &o.value == value)
    }

    #[must_use]
    pub fn accessibility(&self) -> AccessibilityState {
        AccessibilityState {
            expanded: self.is_open(),
            active_index: self.highlight,
            disabled: self.is_disabled(),
            multiselectable: self.config.is_multiple(),
            entry_count: self.results.len(),
        }
    }

    /// Replaces the option list supplied by the host.
    ///
    /// The highlight cursor is clamped to the new entry count.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::DuplicateOptionValue`] if two options share a value;
    /// the previous options are kept in that case.
    pub fn set_options(&mut self, options: Vec<ComboOption>) -> Result<()> {
        ensure_unique_values(&options)?;
        tracing::debug!(option_count = options.len(), "options replaced");
        self.options = options;
        self.refresh_results();
        Ok(())
    }

    /// Pushes a selection from the host.
    ///
    /// A selection of the wrong shape for the configured mode is converted, and
    /// duplicate values are dropped keeping the first occurrence.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = normalize_selection(selection, &self.config);
        self.refresh_results();
    }

    /// Enables or disables the widget. Disabling closes an open dropdown.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    /// Arms the outside-click listener if the dropdown is open.
    ///
    /// Hosts call this when a new pointer gesture starts, so a dropdown opened
    /// by the previous gesture closes on the next outside press.
    pub fn arm_outside_listener(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener.arm();
        }
    }

    /// Returns whether an outside press would close the dropdown now.
    #[must_use]
    pub fn is_outside_listener_armed(&self) -> bool {
        self.listener.as_ref().is_some_and(OutsideClickListener::is_armed)
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Opens the dropdown, attaching the outside-click listener.
    pub(crate) fn open(&mut self) {
        if self.listener.is_none() {
            tracing::debug!("dropdown opened");
            self.listener = Some(OutsideClickListener::attach());
            self.highlight = None;
        }
    }

    /// Closes the dropdown, detaching the listener and resetting the highlight.
    pub(crate) fn close(&mut self) {
        if self.listener.take().is_some() {
            tracing::debug!("dropdown closed");
        }
        self.highlight = None;
    }

    /// Replaces the query text, resetting the highlight.
    ///
    /// Opens the dropdown once the query reaches `min_chars`.
    pub(crate) fn edit_query(&mut self, query: String) {
        self.query = query;
        self.highlight = None;
        self.refresh_results();

        if self.query.chars().count() >= self.config.min_chars {
            self.open();
        }
    }

    pub(crate) fn pop_query_char(&mut self) -> Option<char> {
        let mut query = self.query.clone();
        let popped = query.pop();
        if popped.is_some() {
            self.edit_query(query);
        }
        popped
    }

    pub(crate) fn move_highlight_down(&mut self) {
        let total = self.results.len();
        if total == 0 {
            return;
        }
        self.highlight = Some(self.highlight.map_or(0, |current| (current + 1) % total));
    }

    pub(crate) fn move_highlight_up(&mut self) {
        let total = self.results.len();
        if total == 0 {
            return;
        }
        self.highlight = Some(match self.highlight {
            None | Some(0) => total - 1,
            Some(current) => current - 1,
        });
    }

    pub(crate) fn set_highlight(&mut self, index: usize) -> bool {
        if index < self.results.len() && self.highlight != Some(index) {
            self.highlight = Some(index);
            true
        } else {
            false
        }
    }

    /// Selects or creates the entry at `index`.
    ///
    /// Disabled options and out-of-range indices are inert and return no actions.
    pub(crate) fn activate(&mut self, index: usize) -> Vec<Action> {
        let activation = match self.results.entry(index) {
            Some(VisibleEntry::Option(option)) if option.disabled => {
                tracing::debug!(value = %option.value, "ignoring disabled option");
                return vec![];
            }
            Some(VisibleEntry::Option(option)) => Activation::Select(option.clone()),
            Some(VisibleEntry::Create(query)) => Activation::Create(query.to_string()),
            None => return vec![],
        };

        match activation {
            Activation::Select(option) => self.select(&option),
            Activation::Create(label) => self.request_create(label),
        }
    }

    fn select(&mut self, option: &ComboOption) -> Vec<Action> {
        tracing::debug!(value = %option.value, label = %option.label, "option selected");

        if self.config.is_multiple() {
            let mut values = self.selection.values();
            if values.contains(&option.value) {
                return vec![];
            }
            values.push(option.value.clone());
            let action = self.commit(Selection::Multiple(values));

            self.query.clear();
            self.highlight = None;
            self.refresh_results();
            vec![action]
        } else {
            let action = self.commit(Selection::Single(Some(option.value.clone())));

            self.query = if self.config.clear_on_select {
                String::new()
            } else {
                option.label.clone()
            };
            self.close();
            self.focused = true;
            self.refresh_results();
            vec![action]
        }
    }

    fn request_create(&mut self, label: String) -> Vec<Action> {
        tracing::debug!(label = %label, "create requested");

        self.query.clear();
        self.close();
        self.refresh_results();
        vec![Action::CreateRequested(label)]
    }

    /// Removes `value` from a multiple selection. Query is left untouched.
    pub(crate) fn remove_value(&mut self, value: &OptionValue) -> Vec<Action> {
        if !self.config.is_multiple() || !self.selection.contains(value) {
            return vec![];
        }

        tracing::debug!(value = %value, "value removed");
        let values = self.selection.values().into_iter().filter(|v| v != value).collect();
        let action = self.commit(Selection::Multiple(values));
        vec![action]
    }

    /// Removes the most recently selected value of a multiple selection.
    pub(crate) fn remove_last(&mut self) -> Vec<Action> {
        match self.selection.values().last() {
            Some(last) => self.remove_value(last),
            None => vec![],
        }
    }

    /// Clears selection and query without opening the dropdown.
    ///
    /// A cleared selection is always reported as `None`, in both modes.
    pub(crate) fn clear(&mut self) -> Vec<Action> {
        let had_selection = !self.selection.is_empty();
        if !had_selection && self.query.is_empty() {
            return vec![];
        }

        tracing::debug!(had_selection, "selection cleared");
        let emptied = if self.config.is_multiple() {
            Selection::Multiple(vec![])
        } else {
            Selection::Single(None)
        };
        self.commit(emptied);

        self.query.clear();
        self.highlight = None;
        self.refresh_results();

        if had_selection {
            vec![Action::SelectionChanged(None)]
        } else {
            vec![]
        }
    }

    /// Applies `next` when uncontrolled and returns the notification for it.
    fn commit(&mut self, next: Selection) -> Action {
        let value = next.to_value();
        if !self.controlled {
            self.selection = next;
        }
        Action::SelectionChanged(value)
    }

    /// Recomputes visible entries and clamps the highlight cursor.
    fn refresh_results(&mut self) {
        self.results = filter_options(&self.options, &self.query, &self.selection, &self.config);

        let total = self.results.len();
        self.highlight = match self.highlight {
            Some(_) if total == 0 => None,
            Some(current) => Some(current.min(total - 1)),
            None => None,
        };
    }
}

enum Activation {
    Select(ComboOption),
    Create(String),
}

fn ensure_unique_values(options: &[ComboOption]) -> Result<()> {
    let mut seen = HashSet::with_capacity(options.len());
    for option in options {
        if !seen.insert(&option.value) {
            tracing::debug!(value = %option.value, "rejecting option list with duplicate value");
            return Err(PickerError::DuplicateOptionValue(option.value.to_string()));
        }
    }
    Ok(())
}

fn normalize_selection(selection: Selection, config: &ComboboxConfig) -> Selection {
    let mut values = selection.values();
    if config.is_multiple() {
        let mut seen = HashSet::new();
        values.retain(|v| seen.insert(v.clone()));
        Selection::Multiple(values)
    } else {
        Selection::Single(values.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SelectionValue;

    fn fruit() -> Vec<ComboOption> {
        vec![
            ComboOption::new("apple", "Apple"),
            ComboOption::new("banana", "Banana"),
            ComboOption::new("cherry", "Cherry"),
        ]
    }

    #[test]
    fn duplicate_values_are_rejected_and_previous_options_kept() {
        let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();
        let duplicated = vec![ComboOption::new("kiwi", "Kiwi"), ComboOption::new("kiwi", "Kiwi fruit")];

        let err = combobox.set_options(duplicated).unwrap_err();
        assert!(matches!(err, PickerError::DuplicateOptionValue(v) if v == "kiwi"));
        assert_eq!(combobox.options().len(), 3);
    }

    #[test]
    fn listener_exists_exactly_while_open() {
        let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();
        assert!(!combobox.is_listening_outside());

        combobox.open();
        assert!(combobox.is_open() && combobox.is_listening_outside());

        combobox.close();
        assert!(!combobox.is_open() && !combobox.is_listening_outside());
    }

    #[test]
    fn highlight_is_clamped_when_options_shrink() {
        let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();
        combobox.open();
        combobox.move_highlight_up();
        assert_eq!(combobox.highlighted_index(), Some(2));

        combobox.set_options(vec![ComboOption::new("apple", "Apple")]).unwrap();
        assert_eq!(combobox.highlighted_index(), Some(0));

        combobox.set_options(vec![]).unwrap();
        assert_eq!(combobox.highlighted_index(), None);
    }

    #[test]
    fn controlled_selection_only_reports_changes() {
        let mut combobox =
            Combobox::controlled(ComboboxConfig::multiple(), fruit(), Selection::Multiple(vec![])).unwrap();
        combobox.open();

        let actions = combobox.activate(0);
        assert_eq!(
            actions,
            vec![Action::SelectionChanged(Some(SelectionValue::Multiple(vec!["apple".into()])))]
        );
        assert!(combobox.selection().is_empty());

        combobox.set_selection(Selection::Multiple(vec!["apple".into()]));
        assert_eq!(combobox.results().option_count(), 2);
    }

    #[test]
    fn pushed_selection_is_normalized_to_mode() {
        let mut multiple = Combobox::new(ComboboxConfig::multiple(), fruit()).unwrap();
        multiple.set_selection(Selection::Multiple(vec!["apple".into(), "apple".into(), "cherry".into()]));
        assert_eq!(multiple.selection(), &Selection::Multiple(vec!["apple".into(), "cherry".into()]));

        let mut single = Combobox::new(ComboboxConfig::single(), fruit()).unwrap();
        single.set_selection(Selection::Multiple(vec!["banana".into(), "cherry".into()]));
        assert_eq!(single.selection(), &Selection::Single(Some("banana".into())));
    }

    #[test]
    fn disabling_closes_dropdown() {
        let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();
        combobox.open();
        combobox.set_disabled(true);

        let state = combobox.accessibility();
        assert!(!state.expanded);
        assert!(state.disabled);
        assert_eq!(state.active_index, None);
    }
}
