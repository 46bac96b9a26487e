//! View model types representing renderable combobox state.
//!
//! [`compute_viewmodel`] turns a [`Combobox`] into display-ready data: the input
//! line, selected value chips, a window of dropdown rows with match highlights,
//! a hint line and the footer. It also records where everything landed so the
//! host can map a pointer press back to a widget target with
//! [`ComboboxViewModel::hit_test`].
//!
//! All rows and columns are 1-indexed terminal coordinates.
//!
//! # Layout
//!
//! ```text
//! row 1            (blank)
//! row 2            title
//! row 3            ────────
//! row 4            input line                      ✕ ▾
//! row 5            chips (multiple mode only)
//! next             ────────
//! list_row..       dropdown rows / hint
//! rows - 1         ────────
//! rows             footer
//! ```

use crate::combobox::{Combobox, VisibleEntry};
use crate::domain::OptionValue;

/// First row of the title.
const HEADER_ROW: usize = 2;
/// Row of the input line.
const INPUT_ROW: usize = 4;
/// Column where chips start.
const TAGS_START_COL: usize = 3;

/// Complete view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboboxViewModel {
    pub header: HeaderInfo,
    pub input: InputLine,
    /// Selected value chips, multiple mode only.
    pub tags: Vec<TagChip>,
    /// Visible window of dropdown rows; empty while closed.
    pub rows: Vec<ListRow>,
    pub hint: Option<Hint>,
    pub footer: FooterInfo,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Short mode description shown beside the title, e.g. `"multi-select"`.
    pub subtitle: String,
}

/// The text input with its affordances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// Query, or the placeholder when the query is empty.
    pub text: String,
    pub is_placeholder: bool,
    pub expanded: bool,
    pub focused: bool,
    pub disabled: bool,
    /// Whether the clear button is drawn.
    pub show_clear: bool,
}

/// A selected value drawn as a removable chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChip {
    pub value: OptionValue,
    pub label: String,
    /// First column of the chip.
    pub start_col: usize,
    /// Column just past the chip.
    pub end_col: usize,
}

/// One dropdown line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    GroupHeader(String),
    Option(OptionRow),
    Create(CreateRow),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    /// Index of the entry in the combobox's entry order.
    pub entry_index: usize,
    pub label: String,
    pub description: Option<String>,
    /// Character ranges of `label` matched by the query.
    pub highlight_ranges: Vec<(usize, usize)>,
    pub is_highlighted: bool,
    pub is_disabled: bool,
    /// Already part of the selection (single mode only; multiple mode hides those).
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRow {
    pub entry_index: usize,
    /// Trimmed query offered for creation.
    pub label: String,
    pub is_highlighted: bool,
}

/// Message shown in place of dropdown rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    /// The query is this many characters short of `min_chars`.
    MoreChars(usize),
    NoResults,
}

impl Hint {
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::MoreChars(1) => "Type 1 more character".to_string(),
            Self::MoreChars(n) => format!("Type {n} more characters"),
            Self::NoResults => "No results".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Where each part of the frame was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    pub header_row: usize,
    pub input_row: usize,
    pub tags_row: Option<usize>,
    /// First dropdown row.
    pub list_row: usize,
    /// Number of dropdown rows that fit.
    pub list_capacity: usize,
    /// Index of the first visible row in the full row list.
    pub scroll_offset: usize,
    pub footer_row: usize,
    /// Column of the clear button on the input row.
    pub clear_col: usize,
    /// Column of the open/closed caret on the input row.
    pub caret_col: usize,
}

/// Widget part under a pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// A selectable or create entry.
    Entry(usize),
    /// The chip of a selected value.
    RemoveTag(OptionValue),
    ClearButton,
    Input,
    /// Inside the widget but on nothing actionable (group header, chip gap).
    Inside,
    Outside,
}

impl ComboboxViewModel {
    /// Maps a 1-indexed terminal cell to the widget part drawn there.
    ///
    /// The widget's bounding region is the input line, the chip line and the
    /// dropdown rows actually drawn; every other cell is outside.
    #[must_use]
    pub fn hit_test(&self, row: usize, col: usize) -> PointerTarget {
        let layout = &self.layout;

        if row == layout.input_row {
            if self.input.show_clear && (layout.clear_col..layout.clear_col + 2).contains(&col) {
                return PointerTarget::ClearButton;
            }
            return PointerTarget::Input;
        }

        if Some(row) == layout.tags_row {
            return self
                .tags
                .iter()
                .find(|tag| (tag.start_col..tag.end_col).contains(&col))
                .map_or(PointerTarget::Inside, |tag| PointerTarget::RemoveTag(tag.value.clone()));
        }

        if row >= layout.list_row {
            let offset = row - layout.list_row;
            if let Some(list_row) = self.rows.get(offset) {
                return match list_row {
                    ListRow::Option(option) => PointerTarget::Entry(option.entry_index),
                    ListRow::Create(create) => PointerTarget::Entry(create.entry_index),
                    ListRow::GroupHeader(_) => PointerTarget::Inside,
                };
            }
            if offset == 0 && self.hint.is_some() {
                return PointerTarget::Inside;
            }
        }

        PointerTarget::Outside
    }
}

/// Computes the view model for a `rows` x `cols` pane.
///
/// # Example
///
/// ```rust
/// use artisan_combobox::combobox::{handle_event, Combobox, ComboboxConfig, Event};
/// use artisan_combobox::domain::ComboOption;
/// use artisan_combobox::ui::viewmodel::{compute_viewmodel, PointerTarget};
///
/// let mut combobox = Combobox::new(
///     ComboboxConfig::default(),
///     vec![ComboOption::new("apple", "Apple")],
/// )?;
/// handle_event(&mut combobox, &Event::ArrowDown)?;
///
/// let vm = compute_viewmodel(&combobox, "Fruit", 20, 60);
/// assert_eq!(vm.rows.len(), 1);
/// assert_eq!(vm.hit_test(vm.layout.list_row, 5), PointerTarget::Entry(0));
/// # Ok::<(), artisan_combobox::PickerError>(())
/// ```
#[must_use]
pub fn compute_viewmodel(combobox: &Combobox, title: &str, rows: usize, cols: usize) -> ComboboxViewModel {
    let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

    let config = combobox.config();
    let multiple = config.is_multiple();

    let tags_row = multiple.then_some(INPUT_ROW + 1);
    let list_row = tags_row.unwrap_or(INPUT_ROW) + 2;
    let footer_row = rows.max(list_row + 2);
    let list_capacity = (footer_row - 1).saturating_sub(list_row);

    let mut layout = Layout {
        rows,
        cols,
        header_row: HEADER_ROW,
        input_row: INPUT_ROW,
        tags_row,
        list_row,
        list_capacity,
        scroll_offset: 0,
        footer_row,
        clear_col: cols.saturating_sub(4).max(1),
        caret_col: cols.saturating_sub(1).max(1),
    };

    let input = InputLine {
        text: if combobox.query().is_empty() {
            config.placeholder.clone()
        } else {
            combobox.query().to_string()
        },
        is_placeholder: combobox.query().is_empty(),
        expanded: combobox.is_open(),
        focused: combobox.is_focused(),
        disabled: combobox.is_disabled(),
        show_clear: config.clearable
            && !combobox.is_disabled()
            && !(combobox.query().is_empty() && combobox.selection().is_empty()),
    };

    let tags = if multiple { compute_tags(combobox, cols) } else { Vec::new() };

    let (rows_out, hint) = if combobox.is_open() {
        let all_rows = compute_rows(combobox);
        let hint = if all_rows.is_empty() {
            let missing = combobox.results().missing_chars;
            Some(if missing > 0 { Hint::MoreChars(missing) } else { Hint::NoResults })
        } else {
            None
        };

        let highlighted_row = all_rows.iter().position(|row| match row {
            ListRow::Option(option) => option.is_highlighted,
            ListRow::Create(create) => create.is_highlighted,
            ListRow::GroupHeader(_) => false,
        });
        layout.scroll_offset = match highlighted_row {
            Some(position) if position >= list_capacity => position + 1 - list_capacity,
            _ => 0,
        };

        let window = all_rows
            .into_iter()
            .skip(layout.scroll_offset)
            .take(list_capacity)
            .collect();
        (window, hint)
    } else {
        (Vec::new(), None)
    };

    ComboboxViewModel {
        header: HeaderInfo {
            title: title.to_string(),
            subtitle: if multiple { "multi-select" } else { "select one" }.to_string(),
        },
        input,
        tags,
        rows: rows_out,
        hint,
        footer: compute_footer(combobox),
        layout,
    }
}

fn compute_tags(combobox: &Combobox, cols: usize) -> Vec<TagChip> {
    let mut tags = Vec::new();
    let mut col = TAGS_START_COL;

    for value in combobox.selection().values() {
        let label = combobox
            .option(&value)
            .map_or_else(|| value.to_string(), |option| option.label.clone());
        // icon + spaces + label + spaces + close glyph
        let width = label.chars().count() + 6;
        if col + width > cols + 1 {
            break;
        }
        tags.push(TagChip {
            value,
            label,
            start_col: col,
            end_col: col + width,
        });
        col += width + 1;
    }

    tags
}

fn compute_rows(combobox: &Combobox) -> Vec<ListRow> {
    let results = combobox.results();
    let config = combobox.config();
    let matcher = config.matcher.bind(combobox.query());
    let highlight = combobox.highlighted_index();

    let mut rows = Vec::with_capacity(results.len() + results.groups.len());
    let mut current_group: Option<&str> = None;

    for (index, entry) in results.entries().enumerate() {
        match entry {
            VisibleEntry::Option(option) => {
                if let Some(group) = option.group.as_deref() {
                    if current_group != Some(group) {
                        rows.push(ListRow::GroupHeader(group.to_string()));
                        current_group = Some(group);
                    }
                }
                rows.push(ListRow::Option(OptionRow {
                    entry_index: index,
                    label: option.label.clone(),
                    description: option.description.clone(),
                    highlight_ranges: matcher.highlight_ranges(&option.label),
                    is_highlighted: highlight == Some(index),
                    is_disabled: option.disabled,
                    is_selected: combobox.selection().contains(&option.value),
                }));
            }
            VisibleEntry::Create(label) => rows.push(ListRow::Create(CreateRow {
                entry_index: index,
                label: label.to_string(),
                is_highlighted: highlight == Some(index),
            })),
        }
    }

    rows
}

fn compute_footer(combobox: &Combobox) -> FooterInfo {
    if combobox.is_disabled() {
        return FooterInfo {
            keybindings: "disabled".to_string(),
        };
    }

    let mut parts = vec!["↑↓: move", "enter: select"];
    if combobox.is_open() {
        parts.push("esc: close");
    } else {
        parts.push("esc: hide");
    }
    if combobox.config().is_multiple() {
        parts.push("⌫: remove last");
    }
    if combobox.config().clearable {
        parts.push("del: clear");
    }

    FooterInfo {
        keybindings: parts.join(" | "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combobox::{handle_event, ComboboxConfig, Event};
    use crate::domain::{ComboOption, Selection};

    fn catalogue() -> Vec<ComboOption> {
        vec![
            ComboOption::new("gift-card", "Gift card"),
            ComboOption::new("mug", "Mug").with_group("Home"),
            ComboOption::new("vase", "Vase").with_group("Home"),
            ComboOption::new("ring", "Ring").with_group("Jewelry").disabled(),
        ]
    }

    fn open(config: ComboboxConfig) -> Combobox {
        let mut combobox = Combobox::new(config, catalogue()).unwrap();
        handle_event(&mut combobox, &Event::ArrowDown).unwrap();
        combobox
    }

    #[test]
    fn rows_insert_group_headers_in_entry_order() {
        let vm = compute_viewmodel(&open(ComboboxConfig::default()), "Categories", 30, 80);

        let kinds: Vec<String> = vm
            .rows
            .iter()
            .map(|row| match row {
                ListRow::GroupHeader(name) => format!("[{name}]"),
                ListRow::Option(option) => format!("{}:{}", option.entry_index, option.label),
                ListRow::Create(create) => format!("+{}", create.label),
            })
            .collect();
        assert_eq!(kinds, vec!["0:Gift card", "[Home]", "1:Mug", "2:Vase", "[Jewelry]", "3:Ring"]);
    }

    #[test]
    fn closed_dropdown_draws_no_rows() {
        let combobox = Combobox::new(ComboboxConfig::default(), catalogue()).unwrap();
        let vm = compute_viewmodel(&combobox, "Categories", 30, 80);

        assert!(vm.rows.is_empty());
        assert!(vm.hint.is_none());
        assert!(vm.input.is_placeholder);
        assert!(!vm.input.expanded);
    }

    #[test]
    fn hint_reports_missing_characters() {
        let mut combobox = open(ComboboxConfig::default().with_min_chars(3));
        handle_event(&mut combobox, &Event::Char('m')).unwrap();

        let vm = compute_viewmodel(&combobox, "Categories", 30, 80);
        assert_eq!(vm.hint, Some(Hint::MoreChars(2)));
        assert_eq!(vm.hint.map(Hint::message).as_deref(), Some("Type 2 more characters"));
    }

    #[test]
    fn hint_reports_no_results() {
        let mut combobox = open(ComboboxConfig::default());
        handle_event(&mut combobox, &Event::SetQuery("zzz".to_string())).unwrap();

        let vm = compute_viewmodel(&combobox, "Categories", 30, 80);
        assert_eq!(vm.hint, Some(Hint::NoResults));
    }

    #[test]
    fn window_scrolls_to_keep_highlight_visible() {
        let mut combobox = open(ComboboxConfig::default());
        for _ in 0..4 {
            handle_event(&mut combobox, &Event::ArrowDown).unwrap();
        }
        assert_eq!(combobox.highlighted_index(), Some(3));

        // list_row is 6 and the border sits on row 9
        let vm = compute_viewmodel(&combobox, "Categories", 10, 80);
        assert_eq!(vm.layout.list_capacity, 3);
        assert_eq!(vm.layout.scroll_offset, 3);
        assert!(matches!(vm.rows.last(), Some(ListRow::Option(row)) if row.is_highlighted && row.is_disabled));
    }

    #[test]
    fn hit_test_maps_cells_to_targets() {
        let config = ComboboxConfig::multiple().with_clearable(true);
        let mut combobox = Combobox::new(config, catalogue()).unwrap();
        combobox.set_selection(Selection::Multiple(vec!["mug".into()]));
        handle_event(&mut combobox, &Event::ArrowDown).unwrap();

        let vm = compute_viewmodel(&combobox, "Categories", 30, 80);
        let layout = vm.layout;

        assert_eq!(vm.hit_test(layout.input_row, 10), PointerTarget::Input);
        assert_eq!(vm.hit_test(layout.input_row, layout.clear_col), PointerTarget::ClearButton);
        assert_eq!(
            vm.hit_test(layout.tags_row.unwrap(), vm.tags[0].start_col),
            PointerTarget::RemoveTag("mug".into())
        );
        assert_eq!(vm.hit_test(layout.list_row, 4), PointerTarget::Entry(0));
        assert_eq!(vm.hit_test(layout.list_row + 1, 4), PointerTarget::Inside);
        assert_eq!(vm.hit_test(layout.list_row + 2, 4), PointerTarget::Entry(1));
        assert_eq!(vm.hit_test(layout.header_row, 4), PointerTarget::Outside);
        assert_eq!(vm.hit_test(layout.footer_row, 4), PointerTarget::Outside);
    }

    #[test]
    fn chips_use_option_labels_and_stop_at_pane_edge() {
        let mut combobox = Combobox::new(ComboboxConfig::multiple(), catalogue()).unwrap();
        combobox.set_selection(Selection::Multiple(vec!["gift-card".into(), "mug".into(), "vase".into()]));

        let vm = compute_viewmodel(&combobox, "Categories", 30, 30);
        let labels: Vec<&str> = vm.tags.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Gift card", "Mug"]);
        assert!(vm.tags.iter().all(|t| t.end_col <= 31));
    }

    #[test]
    fn match_ranges_follow_query() {
        let mut combobox = open(ComboboxConfig::default());
        handle_event(&mut combobox, &Event::SetQuery("as".to_string())).unwrap();

        let vm = compute_viewmodel(&combobox, "Categories", 30, 80);
        let vase = vm.rows.iter().find_map(|row| match row {
            ListRow::Option(option) if option.label == "Vase" => Some(option),
            _ => None,
        });
        assert_eq!(vase.map(|row| row.highlight_ranges.clone()), Some(vec![(1, 3)]));
    }
}
