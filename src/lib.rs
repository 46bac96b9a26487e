//! Artisan Combobox: a headless combobox engine with a Zellij picker plugin.
//!
//! The crate has two halves:
//!
//! - a headless widget engine ([`combobox`]): option filtering, highlight
//!   navigation, single and multiple selection, "create" entries, and the
//!   open/close lifecycle with its outside-click listener. It knows nothing
//!   about terminals or storage.
//! - a Zellij plugin built around it: a terminal renderer ([`ui`]), catalogue
//!   persistence ([`storage`]) on a worker thread ([`worker`]), and the glue
//!   between them ([`app`]).

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Pointer hit-testing, Escape handling             │
//! │  - Widget actions → worker messages                 │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Engine        │   │ UI Layer      │   │ Worker Layer  │
//! │ (combobox/)   │   │ (ui/)         │   │ (worker/)     │
//! │ - Filtering   │   │ - View model  │   │ - Catalogues  │
//! │ - Selection   │   │ - Rendering   │   │ - IPC bridge  │
//! │ - Lifecycle   │   │ - Theming     │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                 │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage (storage/), Domain (domain/),              │
//! │  Infrastructure (infrastructure/)                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/artisan-combobox.wasm" {
//!         catalog "product-categories"
//!         mode "multiple"
//!         min_chars "1"
//!         creatable "true"
//!         clearable "true"
//!         matcher "fuzzy"
//!         theme "terracotta"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use artisan_combobox::combobox::{handle_event, Action, Combobox, ComboboxConfig, Event};
//! use artisan_combobox::domain::{ComboOption, SelectionValue};
//!
//! let mut combobox = Combobox::new(
//!     ComboboxConfig::default(),
//!     vec![ComboOption::new("apple", "Apple"), ComboOption::new("banana", "Banana")],
//! )?;
//!
//! for c in "ap".chars() {
//!     handle_event(&mut combobox, &Event::Char(c))?;
//! }
//! handle_event(&mut combobox, &Event::ArrowDown)?;
//! let (_, actions) = handle_event(&mut combobox, &Event::Enter)?;
//!
//! assert_eq!(
//!     actions,
//!     vec![Action::SelectionChanged(Some(SelectionValue::Single("apple".into())))]
//! );
//! assert_eq!(combobox.query(), "Apple");
//! # Ok::<(), artisan_combobox::PickerError>(())
//! ```

pub mod app;
pub mod combobox;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use combobox::{handle_event, Action, Combobox, ComboboxConfig, Event, Matcher, SelectionMode};
pub use domain::{ComboOption, OptionValue, PickerError, Result, Selection, SelectionValue};
pub use ui::Theme;

use app::AppState;
use combobox::DEFAULT_MAX_OPTIONS;
use std::collections::BTreeMap;

/// Catalogue edited when none is configured.
pub const DEFAULT_CATALOG: &str = "product-categories";

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalogue to load and edit. Default: `product-categories`
    pub catalog: String,

    pub mode: SelectionMode,

    /// Characters required before options are listed. Default: 0
    pub min_chars: usize,

    /// Cap on listed options. Default: 50
    pub max_options: usize,

    pub creatable: bool,
    pub clear_on_select: bool,
    pub clearable: bool,

    /// Input text shown while the query is empty.
    pub placeholder: Option<String>,

    /// `substring` or `fuzzy`. Default: `substring`
    pub matcher: Matcher,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` is the host home directory.
    pub theme_file: Option<String>,

    /// Tracing filter, e.g. `debug` or `artisan_combobox=trace`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: DEFAULT_CATALOG.to_string(),
            mode: SelectionMode::Single,
            min_chars: 0,
            max_options: DEFAULT_MAX_OPTIONS,
            creatable: false,
            clear_on_select: false,
            clearable: true,
            placeholder: None,
            matcher: Matcher::Substring,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

/// Parses a boolean flag; anything unrecognised keeps `default`.
fn parse_flag(config: &BTreeMap<String, String>, key: &str, default: bool) -> bool {
    match config.get(key).map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "true" | "yes" | "on" | "1") => true,
        Some(v) if matches!(v.as_str(), "false" | "no" | "off" | "0") => false,
        Some(v) => {
            tracing::debug!(key = %key, value = %v, "unrecognised flag value, using default");
            default
        }
        None => default,
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Values that fail to parse fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use artisan_combobox::{Config, SelectionMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("mode".to_string(), "multiple".to_string());
    /// map.insert("min_chars".to_string(), "2".to_string());
    /// map.insert("max_options".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.mode, SelectionMode::Multiple);
    /// assert_eq!(config.min_chars, 2);
    /// assert_eq!(config.max_options, 50);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let catalog = config
            .get("catalog")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.catalog);

        let mode = config
            .get("mode")
            .and_then(|s| SelectionMode::from_name(s))
            .unwrap_or(defaults.mode);

        let min_chars = config
            .get("min_chars")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(defaults.min_chars);

        let max_options = config
            .get("max_options")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(defaults.max_options);

        let matcher = config
            .get("matcher")
            .and_then(|s| match s.parse::<Matcher>() {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    tracing::debug!(error = %e, "invalid matcher, using default");
                    None
                }
            })
            .unwrap_or(defaults.matcher);

        Self {
            catalog,
            mode,
            min_chars,
            max_options,
            creatable: parse_flag(config, "creatable", defaults.creatable),
            clear_on_select: parse_flag(config, "clear_on_select", defaults.clear_on_select),
            clearable: parse_flag(config, "clearable", defaults.clearable),
            placeholder: config.get("placeholder").cloned(),
            matcher,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// The widget configuration described by these plugin options.
    #[must_use]
    pub fn combobox_config(&self) -> ComboboxConfig {
        let base = ComboboxConfig {
            mode: self.mode,
            ..ComboboxConfig::default()
        };
        let base = match &self.placeholder {
            Some(placeholder) => base.with_placeholder(placeholder.clone()),
            None => base,
        };

        base.with_min_chars(self.min_chars)
            .with_max_options(self.max_options)
            .with_creatable(self.creatable)
            .with_clear_on_select(self.clear_on_select)
            .with_clearable(self.clearable)
            .with_matcher(self.matcher.clone())
    }

    /// Resolves the theme: file first, then built-in name, then the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the plugin state for `config`.
///
/// The widget starts controlled, closed, with no options; the catalogue
/// arrives from the worker once permissions are granted.
///
/// # Errors
///
/// Propagates widget construction errors.
///
/// # Example
///
/// ```rust
/// use artisan_combobox::{initialize, Config};
///
/// let state = initialize(&Config::default())?;
/// assert!(state.combobox.is_controlled());
/// assert_eq!(state.title, "Product categories");
/// # Ok::<(), artisan_combobox::PickerError>(())
/// ```
pub fn initialize(config: &Config) -> Result<AppState> {
    tracing::debug!(catalog = %config.catalog, mode = ?config.mode, "initializing picker");

    let combobox_config = config.combobox_config();
    let selection = match combobox_config.mode {
        SelectionMode::Single => Selection::Single(None),
        SelectionMode::Multiple => Selection::Multiple(Vec::new()),
    };
    let combobox = Combobox::controlled(combobox_config, Vec::new(), selection)?;

    Ok(AppState::new(combobox, config.load_theme(), config.catalog.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.catalog, DEFAULT_CATALOG);
        assert_eq!(config.mode, SelectionMode::Single);
        assert_eq!(config.max_options, DEFAULT_MAX_OPTIONS);
        assert!(config.clearable);
        assert!(!config.creatable);
    }

    #[test]
    fn all_options_parse() {
        let config = Config::from_zellij(&map(&[
            ("catalog", "shop-tags"),
            ("mode", "Multiple"),
            ("min_chars", "1"),
            ("max_options", "10"),
            ("creatable", "yes"),
            ("clear_on_select", "true"),
            ("clearable", "off"),
            ("placeholder", "Find a tag"),
            ("matcher", "fuzzy"),
            ("theme", "terracotta"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.catalog, "shop-tags");
        assert_eq!(config.mode, SelectionMode::Multiple);
        assert_eq!(config.min_chars, 1);
        assert_eq!(config.max_options, 10);
        assert!(config.creatable);
        assert!(config.clear_on_select);
        assert!(!config.clearable);
        assert!(matches!(config.matcher, Matcher::Fuzzy));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));

        let widget = config.combobox_config();
        assert!(widget.is_multiple());
        assert_eq!(widget.placeholder, "Find a tag");
        assert_eq!(widget.max_options, 10);
        assert_eq!(config.load_theme().name, "terracotta");
    }

    #[test]
    fn bad_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("catalog", "   "),
            ("mode", "several"),
            ("min_chars", "-1"),
            ("creatable", "maybe"),
            ("matcher", "regex"),
            ("theme", "neon"),
        ]));

        assert_eq!(config.catalog, DEFAULT_CATALOG);
        assert_eq!(config.mode, SelectionMode::Single);
        assert_eq!(config.min_chars, 0);
        assert!(!config.creatable);
        assert!(matches!(config.matcher, Matcher::Substring));
        assert_eq!(config.load_theme().name, ui::theme::DEFAULT_THEME);
    }

    #[test]
    fn missing_theme_file_falls_back_to_default() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            theme_name: Some("terracotta".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, ui::theme::DEFAULT_THEME);
    }

    #[test]
    fn initialize_builds_controlled_widget() {
        let config = Config {
            mode: SelectionMode::Multiple,
            catalog: "shop_tags".to_string(),
            ..Config::default()
        };
        let state = initialize(&config).unwrap();

        assert!(state.combobox.is_controlled());
        assert_eq!(state.combobox.selection(), &Selection::Multiple(vec![]));
        assert_eq!(state.catalog, "shop_tags");
        assert_eq!(state.title, "Shop tags");
    }
}
