//! Selected value chips renderer.

use crate::ui::helpers::cursor_to;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TagChip;

/// Renders chips at their precomputed columns on `row`.
pub fn render_tags(frame: &mut String, row: usize, tags: &[TagChip], theme: &Theme) -> usize {
    for tag in tags {
        cursor_to(frame, row, tag.start_col);
        frame.push_str(&Theme::fg(&theme.colors.tag_fg));
        frame.push_str(&Theme::bg(&theme.colors.tag_bg));
        frame.push_str(&format!(
            " {} {} {} ",
            theme.icons.tag.glyph(),
            tag.label,
            theme.icons.clear.glyph()
        ));
        frame.push_str(Theme::reset());
    }
    row + 1
}
