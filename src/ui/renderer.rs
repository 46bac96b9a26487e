//! Top-level rendering coordinator.
//!
//! Rendering is two steps:
//!
//! 1. **View Model Computation**: [`compute_viewmodel`] turns a [`Combobox`]
//!    into display-ready rows
//! 2. **Component Rendering**: [`components::render_frame`] draws them into a
//!    frame buffer
//!
//! The finished frame is written to stdout in a single `print!`.

use crate::combobox::Combobox;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{compute_viewmodel, ComboboxViewModel};

/// Renders the combobox to stdout and returns the view model that was drawn.
///
/// The host keeps the returned view model to hit-test pointer events against
/// the frame the user actually saw.
pub fn render(combobox: &Combobox, theme: &Theme, title: &str, rows: usize, cols: usize) -> ComboboxViewModel {
    let viewmodel = compute_viewmodel(combobox, title, rows, cols);
    print!("{}", render_to_string(&viewmodel, theme));
    viewmodel
}

/// Renders a view model into an ANSI frame without printing it.
#[must_use]
pub fn render_to_string(vm: &ComboboxViewModel, theme: &Theme) -> String {
    components::render_frame(vm, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combobox::{handle_event, ComboboxConfig, Event};
    use crate::domain::ComboOption;
    use crate::ui::viewmodel::Hint;

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn catalogue() -> Vec<ComboOption> {
        vec![
            ComboOption::new("mug", "Mug").with_group("Home"),
            ComboOption::new("vase", "Vase").with_group("Home"),
            ComboOption::new("ring", "Ring").with_description("Silver, hand forged"),
        ]
    }

    #[test]
    fn closed_frame_shows_placeholder_and_collapsed_caret() {
        let theme = Theme::default();
        let combobox = Combobox::new(ComboboxConfig::default(), catalogue()).unwrap();
        let vm = compute_viewmodel(&combobox, "Categories", 20, 60);

        let text = strip_ansi(&render_to_string(&vm, &theme));
        assert!(text.contains("Categories"));
        assert!(text.contains("Search..."));
        assert!(text.contains(theme.icons.collapsed.glyph()));
        assert!(!text.contains("Vase"));
    }

    #[test]
    fn open_frame_lists_groups_options_and_descriptions() {
        let theme = Theme::default();
        let mut combobox = Combobox::new(ComboboxConfig::default(), catalogue()).unwrap();
        handle_event(&mut combobox, &Event::ArrowDown).unwrap();
        let vm = compute_viewmodel(&combobox, "Categories", 20, 80);

        let text = strip_ansi(&render_to_string(&vm, &theme));
        assert!(text.contains(&format!("{} Home", theme.icons.group.glyph())));
        assert!(text.contains("Vase"));
        assert!(text.contains("Silver, hand forged"));
        assert!(text.contains(theme.icons.expanded.glyph()));
    }

    #[test]
    fn create_entry_and_chips_are_drawn() {
        let theme = Theme::default();
        let config = ComboboxConfig::multiple().with_creatable(true);
        let mut combobox = Combobox::new(config, catalogue()).unwrap();
        for event in [Event::ArrowDown, Event::ArrowDown, Event::Enter] {
            handle_event(&mut combobox, &event).unwrap();
        }
        handle_event(&mut combobox, &Event::SetQuery("Raku".to_string())).unwrap();
        let vm = compute_viewmodel(&combobox, "Tags", 20, 80);

        let text = strip_ansi(&render_to_string(&vm, &theme));
        assert!(text.contains("Create \"Raku\""));
        assert!(text.contains(&format!("{} Ring {}", theme.icons.tag.glyph(), theme.icons.clear.glyph())));
    }

    #[test]
    fn hint_replaces_rows_when_nothing_matches() {
        let theme = Theme::default();
        let mut combobox = Combobox::new(ComboboxConfig::default(), catalogue()).unwrap();
        handle_event(&mut combobox, &Event::SetQuery("zzz".to_string())).unwrap();
        let vm = compute_viewmodel(&combobox, "Categories", 20, 80);

        let text = strip_ansi(&render_to_string(&vm, &theme));
        assert!(text.contains(&Hint::NoResults.message()));
    }
}
