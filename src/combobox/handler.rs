//! Event handling for the combobox.
//!
//! This module contains the state machine that processes user input and host
//! updates. The host translates raw key presses and pointer events into
//! [`Event`]s, calls [`handle_event`], re-renders when asked to and executes the
//! returned [`Action`]s.
//!
//! # Event Flow
//!
//! 1. Host receives a Zellij key or mouse event
//! 2. Host maps it to an [`Event`] (or drops it)
//! 3. [`handle_event`] dispatches and the handler mutates the [`Combobox`]
//! 4. Events outside a pointer gesture arm a pending outside-click listener
//! 5. The host gets back `(should_render, actions)`
//!
//! A pointer gesture is a press plus the widget events it maps to
//! ([`Event::is_pointer_gesture`]). A dropdown opened during a gesture keeps
//! ignoring outside presses until a keyboard or host event, or until the host
//! starts the next gesture with [`Combobox::arm_outside_listener`].
//!
//! Host updates ([`Event::OptionsLoaded`], [`Event::SelectionSet`],
//! [`Event::SetDisabled`]) are applied even while the widget is disabled; every
//! user event is ignored until it is enabled again.

use super::actions::Action;
use super::state::Combobox;
use crate::domain::{ComboOption, OptionValue, Result, Selection};

/// Inputs to the combobox state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Backspace,
    /// A typed character appended to the query.
    Char(char),
    /// The whole input text replaced (paste, host-driven edit).
    SetQuery(String),
    /// The input received focus.
    Focus,
    /// Pointer press on the visible entry at this index.
    ClickEntry(usize),
    /// Pointer moved over the visible entry at this index.
    HoverEntry(usize),
    /// Close action of a selected tag.
    RemoveValue(OptionValue),
    /// The clear button.
    Clear,
    /// Pointer press anywhere, tagged with whether it hit the widget.
    PointerDown { inside: bool },
    /// Host supplied a new option list.
    OptionsLoaded(Vec<ComboOption>),
    /// Host pushed the selection to display.
    SelectionSet(Selection),
    SetDisabled(bool),
}

impl Event {
    /// Returns whether this event belongs to a pointer gesture.
    #[must_use]
    pub const fn is_pointer_gesture(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. }
                | Self::Focus
                | Self::ClickEntry(_)
                | Self::HoverEntry(_)
                | Self::RemoveValue(_)
                | Self::Clear
        )
    }
}

/// Processes one event.
///
/// Returns whether the widget needs re-rendering and the notifications the host
/// should execute.
///
/// # Errors
///
/// Returns [`crate::PickerError::DuplicateOptionValue`] when an
/// [`Event::OptionsLoaded`] list holds duplicate values; the widget keeps its
/// previous options.
///
/// # Example
///
/// ```rust
/// use artisan_combobox::combobox::{handle_event, Combobox, ComboboxConfig, Event};
/// use artisan_combobox::domain::ComboOption;
///
/// let mut combobox = Combobox::new(
///     ComboboxConfig::default(),
///     vec![ComboOption::new("apple", "Apple")],
/// )?;
/// let (should_render, actions) = handle_event(&mut combobox, &Event::ArrowDown)?;
/// assert!(should_render);
/// assert!(actions.is_empty());
/// assert!(combobox.is_open());
/// # Ok::<(), artisan_combobox::PickerError>(())
/// ```
pub fn handle_event(combobox: &mut Combobox, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!(
        "handle_event",
        event_type = ?event,
        open = combobox.is_open(),
        highlight = ?combobox.highlighted_index()
    )
    .entered();

    let result = dispatch(combobox, event)?;
    if !event.is_pointer_gesture() {
        combobox.arm_outside_listener();
    }
    Ok(result)
}

fn dispatch(combobox: &mut Combobox, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::OptionsLoaded(options) => {
            combobox.set_options(options.clone())?;
            return Ok((true, vec![]));
        }
        Event::SelectionSet(selection) => {
            combobox.set_selection(selection.clone());
            return Ok((true, vec![]));
        }
        Event::SetDisabled(disabled) => {
            combobox.set_disabled(*disabled);
            return Ok((true, vec![]));
        }
        _ => {}
    }

    if combobox.is_disabled() {
        tracing::trace!("widget disabled, ignoring event");
        return Ok((false, vec![]));
    }

    let result = match event {
        Event::ArrowDown => handle_arrow_down(combobox),
        Event::ArrowUp => handle_arrow_up(combobox),
        Event::Enter => handle_enter(combobox),
        Event::Escape => handle_escape(combobox),
        Event::Backspace => handle_backspace(combobox),
        Event::Char(c) => {
            let mut query = combobox.query().to_string();
            query.push(*c);
            edit_query(combobox, query)
        }
        Event::SetQuery(query) => {
            if query == combobox.query() {
                (false, vec![])
            } else {
                edit_query(combobox, query.clone())
            }
        }
        Event::Focus => handle_focus(combobox),
        Event::ClickEntry(index) => handle_click(combobox, *index),
        Event::HoverEntry(index) => (combobox.is_open() && combobox.set_highlight(*index), vec![]),
        Event::RemoveValue(value) => {
            let actions = combobox.remove_value(value);
            (!actions.is_empty(), actions)
        }
        Event::Clear => handle_clear(combobox),
        Event::PointerDown { inside } => handle_pointer_down(combobox, *inside),
        Event::OptionsLoaded(_) | Event::SelectionSet(_) | Event::SetDisabled(_) => (false, vec![]),
    };

    Ok(result)
}

fn handle_arrow_down(combobox: &mut Combobox) -> (bool, Vec<Action>) {
    if combobox.is_open() {
        combobox.move_highlight_down();
    } else {
        combobox.open();
    }
    (true, vec![])
}

fn handle_arrow_up(combobox: &mut Combobox) -> (bool, Vec<Action>) {
    if !combobox.is_open() {
        return (false, vec![]);
    }
    combobox.move_highlight_up();
    (true, vec![])
}

fn handle_enter(combobox: &mut Combobox) -> (bool, Vec<Action>) {
    if !combobox.is_open() {
        return (false, vec![]);
    }

    match combobox.highlighted_index() {
        Some(index) => {
            let actions = combobox.activate(index);
            (!actions.is_empty(), actions)
        }
        None => (false, vec![]),
    }
}

fn handle_escape(combobox: &mut Combobox) -> (bool, Vec<Action>) {
    if !combobox.is_open() {
        return (false, vec![]);
    }
    combobox.close();
    (true, vec![])
}

fn handle_backspace(combobox: &mut Combobox) -> (bool, Vec<Action>) {
    if combobox.query().is_empty() {
        if combobox.config().is_multiple() && !combobox.selection().is_empty() {
            let actions = combobox.remove_last();
            return (true, actions);
        }
        return (false, vec![]);
    }

    combobox.pop_query_char();
    (true, vec![Action::InputChanged(combobox.query().to_string())])
}

fn edit_query(combobox: &mut Combobox, query: String) -> (bool, Vec<Action>) {
    combobox.edit_query(query);
    (true, vec![Action::InputChanged(combobox.query().to_string())])
}

fn handle_focus(combobox: &mut Combobox) -> (bool, Vec<Action>) {
    combobox.set_focused(true);
    if !combobox.is_open() && combobox.query().chars().count() >= combobox.config().min_chars {
        combobox.open();
    }
    (true, vec![])
}

fn handle_click(combobox: &mut Combobox, index: usize) -> (bool, Vec<Action>) {
    if !combobox.is_open() {
        return (false, vec![]);
    }
    let actions = combobox.activate(index);
    (!actions.is_empty(), actions)
}

fn handle_clear(combobox: &mut Combobox) -> (bool, Vec<Action>) {
    if !combobox.config().clearable {
        return (false, vec![]);
    }
    let before = (combobox.query().to_string(), combobox.selection().clone());
    let actions = combobox.clear();
    let changed = before.0 != combobox.query() || &before.1 != combobox.selection() || !actions.is_empty();
    (changed, actions)
}

fn handle_pointer_down(combobox: &mut Combobox, inside: bool) -> (bool, Vec<Action>) {
    if inside {
        combobox.set_focused(true);
        return (false, vec![]);
    }

    combobox.set_focused(false);
    if combobox.is_outside_listener_armed() {
        tracing::debug!("pointer pressed outside, closing dropdown");
        combobox.close();
        return (true, vec![]);
    }
    (false, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combobox::ComboboxConfig;
    use crate::domain::SelectionValue;

    fn fruit() -> Vec<ComboOption> {
        vec![
            ComboOption::new("apple", "Apple"),
            ComboOption::new("banana", "Banana"),
            ComboOption::new("cherry", "Cherry"),
        ]
    }

    fn send(combobox: &mut Combobox, events: &[Event]) -> Vec<Action> {
        events
            .iter()
            .flat_map(|event| handle_event(combobox, event).unwrap().1)
            .collect()
    }

    #[test]
    fn arrow_down_opens_then_wraps() {
        let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();

        send(&mut combobox, &[Event::ArrowDown]);
        assert!(combobox.is_open());
        assert_eq!(combobox.highlighted_index(), None);

        send(&mut combobox, &[Event::ArrowDown, Event::ArrowDown, Event::ArrowDown]);
        assert_eq!(combobox.highlighted_index(), Some(2));

        send(&mut combobox, &[Event::ArrowDown]);
        assert_eq!(combobox.highlighted_index(), Some(0));
    }

    #[test]
    fn arrow_up_wraps_to_last_entry() {
        let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();

        let (render, _) = handle_event(&mut combobox, &Event::ArrowUp).unwrap();
        assert!(!render, "closed dropdown ignores ArrowUp");

        send(&mut combobox, &[Event::ArrowDown, Event::ArrowUp]);
        assert_eq!(combobox.highlighted_index(), Some(2));

        send(&mut combobox, &[Event::ArrowUp, Event::ArrowUp, Event::ArrowUp]);
        assert_eq!(combobox.highlighted_index(), Some(2));
    }

    #[test]
    fn enter_without_highlight_is_noop() {
        let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();
        let actions = send(&mut combobox, &[Event::ArrowDown, Event::Enter]);

        assert!(actions.is_empty());
        assert!(combobox.selection().is_empty());
        assert!(combobox.is_open());
    }

    #[test]
    fn escape_keeps_query_and_selection() {
        let mut combobox = Combobox::new(ComboboxConfig::single(), fruit()).unwrap();
        combobox.set_selection(Selection::Single(Some("cherry".into())));
        send(&mut combobox, &[Event::Char('b'), Event::ArrowDown, Event::Escape]);

        assert!(!combobox.is_open());
        assert_eq!(combobox.highlighted_index(), None);
        assert_eq!(combobox.query(), "b");
        assert_eq!(combobox.selection(), &Selection::Single(Some("cherry".into())));
    }

    #[test]
    fn arrow_down_wraps_past_create_entry() {
        let config = ComboboxConfig::default().with_creatable(true);
        let mut combobox = Combobox::new(config, fruit()).unwrap();
        send(&mut combobox, &[Event::Char('a'), Event::Char('n')]);
        assert_eq!(combobox.results().option_count(), 1);
        assert_eq!(combobox.results().len(), 2);

        let highlights: Vec<_> = (0..4)
            .map(|_| {
                send(&mut combobox, &[Event::ArrowDown]);
                combobox.highlighted_index()
            })
            .collect();
        assert_eq!(highlights, vec![Some(0), Some(1), Some(0), Some(1)]);
    }

    #[test]
    fn typing_resets_highlight_and_reports_input() {
        let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();
        send(&mut combobox, &[Event::ArrowDown, Event::ArrowDown]);
        assert_eq!(combobox.highlighted_index(), Some(0));

        let actions = send(&mut combobox, &[Event::Char('c')]);
        assert_eq!(actions, vec![Action::InputChanged("c".to_string())]);
        assert_eq!(combobox.highlighted_index(), None);
    }

    #[test]
    fn typing_opens_only_at_min_chars() {
        let config = ComboboxConfig::default().with_min_chars(2);
        let mut combobox = Combobox::new(config, fruit()).unwrap();

        send(&mut combobox, &[Event::Char('a')]);
        assert!(!combobox.is_open());

        send(&mut combobox, &[Event::Char('p')]);
        assert!(combobox.is_open());
    }

    #[test]
    fn backspace_with_query_edits_text_only() {
        let mut combobox = Combobox::new(ComboboxConfig::multiple(), fruit()).unwrap();
        combobox.set_selection(Selection::Multiple(vec!["apple".into()]));

        let actions = send(&mut combobox, &[Event::Char('c'), Event::Backspace]);
        assert_eq!(
            actions,
            vec![Action::InputChanged("c".to_string()), Action::InputChanged(String::new())]
        );
        assert_eq!(combobox.selection(), &Selection::Multiple(vec!["apple".into()]));
    }

    #[test]
    fn backspace_in_single_mode_with_empty_query_is_noop() {
        let mut combobox = Combobox::new(ComboboxConfig::single(), fruit()).unwrap();
        combobox.set_selection(Selection::Single(Some("apple".into())));

        let (render, actions) = handle_event(&mut combobox, &Event::Backspace).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(!combobox.selection().is_empty());
    }

    #[test]
    fn multiple_select_clears_query_and_stays_open() {
        let mut combobox = Combobox::new(ComboboxConfig::multiple(), fruit()).unwrap();
        let actions = send(&mut combobox, &[Event::Char('r'), Event::ArrowDown, Event::Enter]);

        assert_eq!(
            actions.last(),
            Some(&Action::SelectionChanged(Some(SelectionValue::Multiple(vec!["cherry".into()]))))
        );
        assert_eq!(combobox.query(), "");
        assert!(combobox.is_open());
        assert_eq!(combobox.results().option_count(), 2);
    }

    #[test]
    fn single_select_with_clear_on_select_empties_query() {
        let config = ComboboxConfig::single().with_clear_on_select(true);
        let mut combobox = Combobox::new(config, fruit()).unwrap();
        send(&mut combobox, &[Event::Char('b'), Event::ArrowDown, Event::Enter]);

        assert_eq!(combobox.selection(), &Selection::Single(Some("banana".into())));
        assert_eq!(combobox.query(), "");
        assert!(!combobox.is_open());
        assert!(combobox.is_focused());
    }

    #[test]
    fn reselecting_in_single_mode_is_idempotent() {
        let mut combobox = Combobox::new(ComboboxConfig::single(), fruit()).unwrap();
        send(&mut combobox, &[Event::ArrowDown, Event::ClickEntry(1)]);
        let first = combobox.selection().clone();

        send(&mut combobox, &[Event::SetQuery(String::new()), Event::ClickEntry(1)]);
        assert_eq!(combobox.selection(), &first);
    }

    #[test]
    fn remove_value_never_touches_query() {
        let mut combobox = Combobox::new(ComboboxConfig::multiple(), fruit()).unwrap();
        combobox.set_selection(Selection::Multiple(vec!["apple".into(), "banana".into()]));
        send(&mut combobox, &[Event::Char('c')]);

        let actions = send(&mut combobox, &[Event::RemoveValue("apple".into())]);
        assert_eq!(
            actions,
            vec![Action::SelectionChanged(Some(SelectionValue::Multiple(vec!["banana".into()])))]
        );
        assert_eq!(combobox.query(), "c");
    }

    #[test]
    fn clear_requires_clearable_and_never_opens() {
        let mut combobox = Combobox::new(ComboboxConfig::multiple(), fruit()).unwrap();
        combobox.set_selection(Selection::Multiple(vec!["apple".into()]));
        assert!(send(&mut combobox, &[Event::Clear]).is_empty());

        let config = ComboboxConfig::multiple().with_clearable(true);
        let mut combobox = Combobox::new(config, fruit()).unwrap();
        combobox.set_selection(Selection::Multiple(vec!["apple".into()]));
        send(&mut combobox, &[Event::Char('b'), Event::Escape]);

        let actions = send(&mut combobox, &[Event::Clear]);
        assert_eq!(actions, vec![Action::SelectionChanged(None)]);
        assert!(combobox.selection().is_empty());
        assert_eq!(combobox.query(), "");
        assert!(!combobox.is_open());
    }

    #[test]
    fn outside_press_closes_and_keeps_query_and_selection() {
        let mut combobox = Combobox::new(ComboboxConfig::multiple(), fruit()).unwrap();
        combobox.set_selection(Selection::Multiple(vec!["apple".into()]));
        send(&mut combobox, &[Event::Char('b'), Event::ArrowDown]);
        assert_eq!(combobox.highlighted_index(), Some(0));

        let actions = send(&mut combobox, &[Event::PointerDown { inside: false }]);
        assert!(actions.is_empty());
        assert!(!combobox.is_open());
        assert!(!combobox.is_listening_outside());
        assert_eq!(combobox.highlighted_index(), None);
        assert_eq!(combobox.query(), "b");
        assert_eq!(combobox.selection(), &Selection::Multiple(vec!["apple".into()]));
    }

    #[test]
    fn outside_press_in_opening_gesture_is_ignored() {
        let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();
        send(&mut combobox, &[Event::PointerDown { inside: true }, Event::Focus]);
        assert!(combobox.is_open());
        assert!(!combobox.is_outside_listener_armed());

        let (render, _) = handle_event(&mut combobox, &Event::PointerDown { inside: false }).unwrap();
        assert!(!render);
        assert!(combobox.is_open());

        combobox.arm_outside_listener();
        send(&mut combobox, &[Event::PointerDown { inside: false }]);
        assert!(!combobox.is_open());
    }

    #[test]
    fn keyboard_opened_dropdown_closes_on_next_outside_press() {
        for opener in [Event::ArrowDown, Event::Char('a'), Event::SetQuery("b".to_string())] {
            let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();
            send(&mut combobox, &[opener.clone()]);
            assert!(combobox.is_open(), "{opener:?} opens");

            send(&mut combobox, &[Event::PointerDown { inside: false }]);
            assert!(!combobox.is_open(), "{opener:?} then outside press");
        }
    }

    #[test]
    fn inside_press_keeps_dropdown_open() {
        let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();
        send(&mut combobox, &[Event::ArrowDown, Event::PointerDown { inside: true }]);
        assert!(combobox.is_open());
    }

    #[test]
    fn disabled_widget_ignores_user_events() {
        let config = ComboboxConfig::default().with_disabled(true);
        let mut combobox = Combobox::new(config, fruit()).unwrap();

        let actions = send(
            &mut combobox,
            &[Event::ArrowDown, Event::Char('a'), Event::Focus, Event::ClickEntry(0)],
        );
        assert!(actions.is_empty());
        assert!(!combobox.is_open());
        assert_eq!(combobox.query(), "");

        send(&mut combobox, &[Event::SetDisabled(false), Event::ArrowDown]);
        assert!(combobox.is_open());
    }

    #[test]
    fn duplicate_options_from_host_are_an_error() {
        let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();
        let event = Event::OptionsLoaded(vec![ComboOption::new("a", "A"), ComboOption::new("a", "B")]);

        assert!(handle_event(&mut combobox, &event).is_err());
        assert_eq!(combobox.options().len(), 3);
    }

    #[test]
    fn hover_moves_highlight_within_range() {
        let mut combobox = Combobox::new(ComboboxConfig::default(), fruit()).unwrap();
        send(&mut combobox, &[Event::ArrowDown, Event::HoverEntry(1)]);
        assert_eq!(combobox.highlighted_index(), Some(1));

        send(&mut combobox, &[Event::HoverEntry(9)]);
        assert_eq!(combobox.highlighted_index(), Some(1));
    }
}
