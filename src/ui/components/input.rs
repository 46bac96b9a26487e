//! Input line renderer.
//!
//! Draws the prompt, the query (or placeholder), the clear button and the
//! open/closed caret on a single row.

use crate::ui::helpers::{cursor_to, pad_to, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{InputLine, Layout};

const PROMPT: &str = " > ";

/// Renders the input line at `layout.input_row`.
pub fn render_input(frame: &mut String, input: &InputLine, theme: &Theme, layout: &Layout) -> usize {
    let row = layout.input_row;
    let prompt_len = PROMPT.chars().count();
    let text_room = layout.clear_col.saturating_sub(prompt_len + 2);

    cursor_to(frame, row, 1);
    let prompt_color = if input.disabled {
        &theme.colors.disabled_fg
    } else {
        &theme.colors.header_fg
    };
    frame.push_str(&Theme::fg(prompt_color));
    frame.push_str(PROMPT);

    let text_color = if input.disabled {
        &theme.colors.disabled_fg
    } else if input.is_placeholder {
        &theme.colors.placeholder_fg
    } else {
        &theme.colors.input_fg
    };
    frame.push_str(&Theme::fg(text_color));
    if input.is_placeholder {
        frame.push_str(Theme::dim());
    }

    let text = truncate(&input.text, text_room);
    let mut used = prompt_len + text.chars().count();
    frame.push_str(&text);
    frame.push_str(Theme::reset());

    if input.focused && !input.disabled && used < layout.clear_col {
        frame.push_str(&Theme::fg(&theme.colors.input_fg));
        frame.push('▏');
        frame.push_str(Theme::reset());
        used += 1;
    }

    if input.show_clear {
        pad_to(frame, used, layout.clear_col.saturating_sub(1));
        frame.push_str(&Theme::fg(&theme.colors.text_dim));
        frame.push_str(theme.icons.clear.glyph());
        frame.push_str(Theme::reset());
        used = used.max(layout.clear_col.saturating_sub(1)) + 1;
    }

    pad_to(frame, used, layout.caret_col.saturating_sub(1));
    let caret = if input.expanded {
        theme.icons.expanded
    } else {
        theme.icons.collapsed
    };
    frame.push_str(&Theme::fg(&theme.colors.text_dim));
    frame.push_str(caret.glyph());
    frame.push_str(Theme::reset());

    row + 1
}
