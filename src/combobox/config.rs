//! Combobox properties supplied by the host.
//!
//! [`ComboboxConfig`] bundles every behavioural switch of the widget. Defaults
//! follow the usual storefront combobox: single mode, no minimum query length,
//! a hard cap of 50 visible options, substring matching.

use super::filter::Matcher;

/// Default cap on the number of real options shown at once.
pub const DEFAULT_MAX_OPTIONS: usize = 50;

/// Whether the widget holds one value or an ordered set of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
}

impl SelectionMode {
    /// Parses `single` / `multiple` (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "single" => Some(Self::Single),
            "multiple" | "multi" => Some(Self::Multiple),
            _ => None,
        }
    }
}

/// Behavioural configuration of a combobox instance.
///
/// # Example
///
/// ```
/// use artisan_combobox::combobox::{ComboboxConfig, SelectionMode};
///
/// let config = ComboboxConfig::multiple()
///     .with_min_chars(2)
///     .with_creatable(true);
///
/// assert_eq!(config.mode, SelectionMode::Multiple);
/// assert_eq!(config.max_options, 50);
/// ```
#[derive(Debug, Clone)]
pub struct ComboboxConfig {
    pub mode: SelectionMode,

    /// Suppresses every open, selection and keyboard transition.
    pub disabled: bool,

    /// Minimum query length (in characters) before any option is listed.
    pub min_chars: usize,

    /// Hard cap on listed options, applied in original order.
    pub max_options: usize,

    /// Offers a synthetic "create" entry for queries matching no label.
    pub creatable: bool,

    /// Empties the query instead of copying the label on single-mode selection.
    pub clear_on_select: bool,

    /// Shows a clear affordance that resets selection and query.
    pub clearable: bool,

    pub placeholder: String,

    /// Predicate deciding whether an option matches the query.
    pub matcher: Matcher,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Single,
            disabled: false,
            min_chars: 0,
            max_options: DEFAULT_MAX_OPTIONS,
            creatable: false,
            clear_on_select: false,
            clearable: false,
            placeholder: "Search...".to_string(),
            matcher: Matcher::default(),
        }
    }
}

impl ComboboxConfig {
    /// Default configuration in single mode.
    #[must_use]
    pub fn single() -> Self {
        Self::default()
    }

    /// Default configuration in multiple mode.
    #[must_use]
    pub fn multiple() -> Self {
        Self {
            mode: SelectionMode::Multiple,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self.mode, SelectionMode::Multiple)
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    #[must_use]
    pub fn with_max_options(mut self, max_options: usize) -> Self {
        self.max_options = max_options;
        self
    }

    #[must_use]
    pub fn with_creatable(mut self, creatable: bool) -> Self {
        self.creatable = creatable;
        self
    }

    #[must_use]
    pub fn with_clear_on_select(mut self, clear_on_select: bool) -> Self {
        self.clear_on_select = clear_on_select;
        self
    }

    #[must_use]
    pub fn with_clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = matcher;
        self
    }
}
