//! Composable UI component renderers.
//!
//! Each component appends one part of the frame to a `String` buffer and
//! returns the next free row.
//!
//! # Components
//!
//! - `header`: Title bar with the mode subtitle
//! - `input`: Query line with clear button and caret
//! - `tags`: Selected value chips (multiple mode)
//! - `listbox`: Group headers, options, the create entry and hints
//! - `footer`: Keybinding hints

mod footer;
mod header;
mod input;
mod listbox;
mod tags;

use crate::ui::helpers::cursor_to;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ComboboxViewModel;

use footer::render_footer;
use header::render_header;
use input::render_input;
use listbox::{render_hint, render_rows};
use tags::render_tags;

/// Renders a horizontal separator; returns the next free row.
fn render_border(frame: &mut String, row: usize, color: &str, cols: usize) -> usize {
    cursor_to(frame, row, 1);
    frame.push_str(&Theme::fg(color));
    frame.push_str(&"─".repeat(cols));
    frame.push_str(Theme::reset());
    row + 1
}

/// Renders the full combobox layout into a frame buffer.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Input]
/// [Tags]              multiple mode only
/// [Border]
/// [Rows or hint]
/// [Border]
/// [Footer]
/// ```
#[must_use]
pub fn render_frame(vm: &ComboboxViewModel, theme: &Theme) -> String {
    let layout = &vm.layout;
    let cols = layout.cols;
    let mut frame = String::new();

    let mut row = render_header(&mut frame, layout.header_row, &vm.header, theme, cols);
    row = render_border(&mut frame, row, &theme.colors.border, cols);
    row = render_input(&mut frame, &vm.input, theme, layout).max(row);
    if let Some(tags_row) = layout.tags_row {
        row = render_tags(&mut frame, tags_row, &vm.tags, theme);
    }
    render_border(&mut frame, row, &theme.colors.border, cols);

    if let Some(hint) = vm.hint {
        render_hint(&mut frame, layout.list_row, hint, theme, cols);
    } else {
        render_rows(&mut frame, layout.list_row, &vm.rows, theme, cols);
    }

    let footer_row = layout.footer_row;
    render_border(&mut frame, footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(&mut frame, footer_row, &vm.footer, theme, cols);

    frame
}
