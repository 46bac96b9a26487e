//! Footer help bar renderer.

use crate::ui::helpers::{cursor_to, pad_to, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centred and dimmed, truncated to the pane width.
pub fn render_footer(frame: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = help_text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    cursor_to(frame, row, 1);
    frame.push_str(&Theme::fg(&theme.colors.text_dim));
    frame.push_str(&" ".repeat(padding));
    frame.push_str(&help_text);
    pad_to(frame, padding + text_len, cols);
    frame.push_str(Theme::reset());
    row + 1
}
