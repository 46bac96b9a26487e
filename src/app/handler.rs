//! Event processing for the picker plugin.
//!
//! Plugin-level events wrap widget events with what only the host knows:
//! where the pointer is relative to the last frame, whether Escape should
//! hide the pane, and what the catalogue worker answered. Widget actions are
//! turned into [`HostAction`]s here:
//!
//! - `SelectionChanged` is echoed back into the controlled widget and saved
//! - `CreateRequested` asks the worker to add the option
//! - `InputChanged` is only traced

use super::actions::HostAction;
use super::state::AppState;
use crate::combobox::{handle_event, Action, Event};
use crate::domain::{ComboOption, Result, Selection, SelectionValue};
use crate::ui::viewmodel::PointerTarget;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events the plugin feeds into [`handle_app_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A widget event that needs no host interpretation.
    Widget(Event),

    /// Escape: closes the dropdown, or hides the pane when it is already closed.
    Dismiss,

    /// Left click at a 1-indexed terminal cell.
    Click { row: usize, col: usize },

    /// Pointer moved over a 1-indexed terminal cell.
    Hover { row: usize, col: usize },

    /// Zellij granted the requested permissions.
    PermissionsGranted,

    WorkerResponse(WorkerResponse),
}

/// Processes one plugin event.
///
/// Returns whether the pane should re-render and the side effects to run.
///
/// # Errors
///
/// Returns [`crate::PickerError::DuplicateOptionValue`] if the worker sent a
/// catalogue with repeated values; the widget keeps its previous options.
///
/// # Example
///
/// ```rust
/// use artisan_combobox::app::{handle_app_event, AppEvent, AppState, HostAction};
/// use artisan_combobox::combobox::{Combobox, ComboboxConfig};
/// use artisan_combobox::ui::Theme;
///
/// let combobox = Combobox::new(ComboboxConfig::default(), vec![])?;
/// let mut state = AppState::new(combobox, Theme::default(), "tags");
///
/// let (_, actions) = handle_app_event(&mut state, &AppEvent::Dismiss)?;
/// assert_eq!(actions, vec![HostAction::CloseFocus]);
/// # Ok::<(), artisan_combobox::PickerError>(())
/// ```
pub fn handle_app_event(state: &mut AppState, event: &AppEvent) -> Result<(bool, Vec<HostAction>)> {
    let _span = tracing::debug_span!("handle_app_event", event_type = ?event).entered();

    match event {
        AppEvent::Widget(event) => dispatch(state, event),
        AppEvent::Dismiss => {
            if state.combobox.is_open() {
                dispatch(state, &Event::Escape)
            } else {
                tracing::debug!("dropdown closed, hiding plugin");
                Ok((false, vec![HostAction::CloseFocus]))
            }
        }
        AppEvent::Click { row, col } => {
            state.combobox.arm_outside_listener();
            let target = pointer_target(state, *row, *col);
            tracing::debug!(row, col, target = ?target, "click");
            handle_click(state, target)
        }
        AppEvent::Hover { row, col } => match pointer_target(state, *row, *col) {
            PointerTarget::Entry(index) => dispatch(state, &Event::HoverEntry(index)),
            _ => Ok((false, vec![])),
        },
        AppEvent::PermissionsGranted => {
            let message = WorkerMessage::load_options(state.catalog.clone());
            Ok((false, vec![HostAction::PostToWorker(message)]))
        }
        AppEvent::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn pointer_target(state: &AppState, row: usize, col: usize) -> PointerTarget {
    state
        .last_view
        .as_ref()
        .map_or(PointerTarget::Outside, |view| view.hit_test(row, col))
}

fn handle_click(state: &mut AppState, target: PointerTarget) -> Result<(bool, Vec<HostAction>)> {
    let follow_up = match target {
        PointerTarget::Outside => return dispatch(state, &Event::PointerDown { inside: false }),
        PointerTarget::Entry(index) => Some(Event::ClickEntry(index)),
        PointerTarget::RemoveTag(value) => Some(Event::RemoveValue(value)),
        PointerTarget::ClearButton => Some(Event::Clear),
        PointerTarget::Input => Some(Event::Focus),
        PointerTarget::Inside => None,
    };

    let (mut render, mut actions) = dispatch(state, &Event::PointerDown { inside: true })?;
    if let Some(event) = follow_up {
        let (follow_render, follow_actions) = dispatch(state, &event)?;
        render |= follow_render;
        actions.extend(follow_actions);
    }
    Ok((render, actions))
}

/// Runs a widget event and executes the widget's actions.
fn dispatch(state: &mut AppState, event: &Event) -> Result<(bool, Vec<HostAction>)> {
    let (mut render, actions) = handle_event(&mut state.combobox, event)?;

    let mut host_actions = Vec::new();
    for action in actions {
        render |= apply_widget_action(state, action, &mut host_actions)?;
    }
    Ok((render, host_actions))
}

fn apply_widget_action(state: &mut AppState, action: Action, host_actions: &mut Vec<HostAction>) -> Result<bool> {
    match action {
        Action::SelectionChanged(value) => {
            let values = match value {
                None => Vec::new(),
                Some(SelectionValue::Single(value)) => vec![value],
                Some(SelectionValue::Multiple(values)) => values,
            };
            tracing::debug!(selected = values.len(), "selection changed");

            let selection = state.selection_from_values(values.clone());
            host_actions.push(HostAction::PostToWorker(WorkerMessage::save_selection(
                state.catalog.clone(),
                values,
            )));
            let (render, _) = handle_event(&mut state.combobox, &Event::SelectionSet(selection))?;
            Ok(render)
        }
        Action::CreateRequested(label) => {
            tracing::debug!(label = %label, "option creation requested");
            host_actions.push(HostAction::PostToWorker(WorkerMessage::create_option(
                state.catalog.clone(),
                label,
            )));
            Ok(false)
        }
        Action::InputChanged(query) => {
            tracing::trace!(query = %query, "input changed");
            Ok(false)
        }
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<HostAction>)> {
    match response {
        WorkerResponse::OptionsLoaded { options, selection } => {
            handle_event(&mut state.combobox, &Event::OptionsLoaded(options.clone()))?;
            let selection = state.selection_from_values(selection.clone());
            handle_event(&mut state.combobox, &Event::SelectionSet(selection))?;
            Ok((true, vec![]))
        }
        WorkerResponse::OptionCreated { option, options } => {
            handle_event(&mut state.combobox, &Event::OptionsLoaded(options.clone()))?;
            Ok(select_created(state, option))
        }
        WorkerResponse::SelectionSaved { count } => {
            tracing::debug!(count, "selection saved");
            Ok((false, vec![]))
        }
        WorkerResponse::Error { message } => {
            tracing::warn!(error = %message, "worker request failed");
            Ok((false, vec![]))
        }
    }
}

/// Adds a freshly created option to the selection and saves it.
fn select_created(state: &mut AppState, option: &ComboOption) -> (bool, Vec<HostAction>) {
    let selection = match state.combobox.selection() {
        Selection::Multiple(values) if values.contains(&option.value) => return (true, vec![]),
        Selection::Multiple(values) => {
            let mut values = values.clone();
            values.push(option.value.clone());
            Selection::Multiple(values)
        }
        Selection::Single(_) => Selection::Single(Some(option.value.clone())),
    };

    let message = WorkerMessage::save_selection(state.catalog.clone(), selection.values());
    state.combobox.set_selection(selection);
    (true, vec![HostAction::PostToWorker(message)])
}
