//! Title bar renderer.

use crate::ui::helpers::{cursor_to, pad_to, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centred title with its dimmed mode subtitle.
///
/// Returns the next free row.
pub fn render_header(frame: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = title.chars().count();
    let subtitle_len = header.subtitle.chars().count() + 3;
    let show_subtitle = title_len + subtitle_len <= cols;
    let total = title_len + if show_subtitle { subtitle_len } else { 0 };
    let padding = cols.saturating_sub(total) / 2;

    cursor_to(frame, row, 1);
    frame.push_str(Theme::bold());
    frame.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        frame.push_str(&Theme::bg(bg));
    }

    frame.push_str(&" ".repeat(padding));
    frame.push_str(&title);
    if show_subtitle {
        frame.push_str(Theme::reset());
        if let Some(bg) = &theme.colors.header_bg {
            frame.push_str(&Theme::bg(bg));
        }
        frame.push_str(&Theme::fg(&theme.colors.text_dim));
        frame.push_str(&format!(" · {}", header.subtitle));
    }
    pad_to(frame, padding + total, cols);

    frame.push_str(Theme::reset());
    row + 1
}
