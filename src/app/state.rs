//! Application state for the picker plugin.
//!
//! [`AppState`] owns the combobox widget together with everything the plugin
//! needs around it: the theme, the catalogue it edits and the view model of
//! the last drawn frame, which pointer events are hit-tested against.

use crate::combobox::Combobox;
use crate::domain::{OptionValue, Selection};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{compute_viewmodel, ComboboxViewModel};

/// Plugin-side state.
#[derive(Debug)]
pub struct AppState {
    /// The widget; controlled, so selection changes round-trip through the host.
    pub combobox: Combobox,

    pub theme: Theme,

    /// Catalogue name used for every worker request.
    pub catalog: String,

    /// Title drawn above the input.
    pub title: String,

    /// View model of the last rendered frame.
    pub last_view: Option<ComboboxViewModel>,
}

impl AppState {
    #[must_use]
    pub fn new(combobox: Combobox, theme: Theme, catalog: impl Into<String>) -> Self {
        let catalog = catalog.into();
        Self {
            combobox,
            theme,
            title: catalog_title(&catalog),
            catalog,
            last_view: None,
        }
    }

    /// Computes the view model for a `rows` x `cols` pane and keeps it for hit-testing.
    pub fn compute_viewmodel(&mut self, rows: usize, cols: usize) -> &ComboboxViewModel {
        let viewmodel = compute_viewmodel(&self.combobox, &self.title, rows, cols);
        self.last_view.insert(viewmodel)
    }

    /// Builds a selection of the widget's shape from persisted values.
    #[must_use]
    pub fn selection_from_values(&self, values: Vec<OptionValue>) -> Selection {
        if self.combobox.config().is_multiple() {
            Selection::Multiple(values)
        } else {
            Selection::Single(values.into_iter().next())
        }
    }
}

/// Turns a catalogue name such as `product-categories` into `Product categories`.
fn catalog_title(catalog: &str) -> String {
    let spaced = catalog.replace(['-', '_'], " ");
    let mut chars = spaced.trim().chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
