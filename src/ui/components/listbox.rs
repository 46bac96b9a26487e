//! Dropdown list renderer.
//!
//! Renders group headers, option rows and the create row. The highlighted
//! entry is drawn with the highlight colours across the full width; match
//! highlights are kept inside it.

use crate::ui::helpers::{self, cursor_to, pad_to, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CreateRow, Hint, ListRow, OptionRow};

/// Columns reserved before a label: pointer, space, marker, space.
const GUTTER: usize = 5;

/// Renders `rows` starting at `row`; returns the next free row.
pub fn render_rows(frame: &mut String, row: usize, rows: &[ListRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for list_row in rows {
        cursor_to(frame, current_row, 1);
        match list_row {
            ListRow::GroupHeader(name) => render_group_header(frame, name, theme, cols),
            ListRow::Option(option) => render_option(frame, option, theme, cols),
            ListRow::Create(create) => render_create(frame, create, theme, cols),
        }
        current_row += 1;
    }
    current_row
}

/// Renders the hint shown instead of rows.
pub fn render_hint(frame: &mut String, row: usize, hint: Hint, theme: &Theme, cols: usize) -> usize {
    let message = truncate(&hint.message(), cols.saturating_sub(3));

    cursor_to(frame, row, 1);
    frame.push_str(&Theme::fg(&theme.colors.hint_fg));
    frame.push_str(Theme::dim());
    frame.push_str("   ");
    frame.push_str(&message);
    pad_to(frame, 3 + message.chars().count(), cols);
    frame.push_str(Theme::reset());
    row + 1
}

fn render_group_header(frame: &mut String, name: &str, theme: &Theme, cols: usize) {
    let text = truncate(&format!(" {} {}", theme.icons.group.glyph(), name), cols);

    frame.push_str(Theme::bold());
    frame.push_str(&Theme::fg(&theme.colors.group_fg));
    frame.push_str(&text);
    pad_to(frame, text.chars().count(), cols);
    frame.push_str(Theme::reset());
}

fn row_style(theme: &Theme, highlighted: bool, fg: &str) -> String {
    if highlighted {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.highlight_fg),
            Theme::bg(&theme.colors.highlight_bg)
        )
    } else {
        Theme::fg(fg)
    }
}

fn render_option(frame: &mut String, option: &OptionRow, theme: &Theme, cols: usize) {
    let fg = if option.is_disabled {
        &theme.colors.disabled_fg
    } else {
        &theme.colors.text_normal
    };
    let style = row_style(theme, option.is_highlighted, fg);
    frame.push_str(&style);

    let pointer = if option.is_highlighted {
        theme.icons.pointer.glyph()
    } else {
        " "
    };
    let marker = if option.is_selected {
        theme.icons.selected.glyph()
    } else {
        " "
    };
    frame.push_str(&format!(" {pointer} {marker} "));

    let label_room = cols.saturating_sub(GUTTER);
    let label = truncate(&option.label, label_room);
    let label_len = label.chars().count();
    if option.is_disabled {
        frame.push_str(&label);
    } else {
        frame.push_str(&helpers::highlighted_text(&label, &option.highlight_ranges, theme, &style));
    }
    let mut used = GUTTER + label_len;

    if let Some(description) = &option.description {
        let room = cols.saturating_sub(used + 2);
        if room > 3 {
            let description = truncate(description, room);
            if !option.is_highlighted {
                frame.push_str(&Theme::fg(&theme.colors.text_dim));
            }
            frame.push_str("  ");
            frame.push_str(&description);
            used += 2 + description.chars().count();
        }
    }

    pad_to(frame, used, cols);
    frame.push_str(Theme::reset());
}

fn render_create(frame: &mut String, create: &CreateRow, theme: &Theme, cols: usize) {
    frame.push_str(&row_style(theme, create.is_highlighted, &theme.colors.create_fg));

    let pointer = if create.is_highlighted {
        theme.icons.pointer.glyph()
    } else {
        " "
    };
    let text = format!(" {pointer} {} Create \"{}\"", theme.icons.create.glyph(), create.label);
    let text = truncate(&text, cols);
    frame.push_str(&text);
    pad_to(frame, text.chars().count(), cols);
    frame.push_str(Theme::reset());
}
