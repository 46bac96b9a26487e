//! Shared rendering utilities.
//!
//! Components append ANSI-styled text to a frame buffer instead of printing
//! directly; the renderer writes the finished frame to stdout in one go. All
//! width arithmetic is in characters, never bytes.

use crate::ui::theme::Theme;

/// Appends a cursor move to `row`, `col` (1-indexed).
pub fn cursor_to(frame: &mut String, row: usize, col: usize) {
    frame.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
///
/// # Example
///
/// ```rust
/// use artisan_combobox::ui::helpers::truncate;
///
/// assert_eq!(truncate("Leather goods", 8), "Leather…");
/// assert_eq!(truncate("Mug", 8), "Mug");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut shortened: String = text.chars().take(max - 1).collect();
    shortened.push('…');
    shortened
}

/// Appends spaces so a line of `used` characters fills `cols`.
pub fn pad_to(frame: &mut String, used: usize, cols: usize) {
    frame.push_str(&" ".repeat(cols.saturating_sub(used)));
}

/// Renders `text` with the character `ranges` drawn in match colours.
///
/// `restore` is the style escape re-applied after each highlighted run, so a
/// highlighted row keeps its background around the matches.
#[must_use]
pub fn highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 48);
    let mut current = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        out.extend(&chars[current..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);
        current = end;
    }

    out.extend(&chars[current..]);
    out
}
