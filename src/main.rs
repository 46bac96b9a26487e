//! Zellij plugin wrapper and entry point.
//!
//! Thin shim between Zellij and the library: it translates Zellij events to
//! [`AppEvent`]s, runs the resulting [`HostAction`]s and renders frames.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← widget, input, rendering
//! │  └──────────────────┘   │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  PickerWorker    │   │  ← catalogue storage
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! - `Down` / `Ctrl+n`: Open the dropdown, then move the highlight down
//! - `Up` / `Ctrl+p`: Move the highlight up
//! - `Enter`: Select the highlighted entry
//! - `Esc`: Close the dropdown; hide the plugin when already closed
//! - `Backspace`: Delete a character, or remove the last chip
//! - `Delete`: Clear selection and query
//! - Mouse: click entries, chips and the clear button; hover to highlight

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use artisan_combobox::app::{handle_app_event, AppEvent, AppState, HostAction};
use artisan_combobox::worker::{PickerWorker, WorkerMessage, WorkerResponse};
use artisan_combobox::{Config, Event};

register_plugin!(State);
register_worker!(PickerWorker, picker_worker, PICKER_WORKER);

/// Name of the worker registered above, and of its response messages.
const WORKER_NAME: &str = "picker";

/// Plugin state wrapper.
#[derive(Default)]
struct State {
    /// `None` until `load` has run.
    app: Option<AppState>,
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        artisan_combobox::observability::init_tracing(&config);

        let _span = tracing::debug_span!("plugin_load", catalog = %config.catalog).entered();

        match artisan_combobox::initialize(&config) {
            Ok(app) => self.app = Some(app),
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize picker");
                return;
            }
        }

        request_permission(&[PermissionType::ReadApplicationState, PermissionType::ChangeApplicationState]);
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let _span =
            tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name).entered();

        let Some(app) = self.app.as_mut() else {
            return false;
        };

        let app_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                tracing::debug!("permissions granted");
                AppEvent::PermissionsGranted
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                tracing::warn!("permissions denied - catalogue will not load");
                return false;
            }
            _ => return false,
        };

        match handle_app_event(app, &app_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        if let Some(app) = self.app.as_mut() {
            let view = artisan_combobox::ui::render(&app.combobox, &app.theme, &app.title, rows, cols);
            app.last_view = Some(view);
        }
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(_) => "Mouse".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(key: &KeyWithModifier) -> Option<AppEvent> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(AppEvent::Widget(Event::ArrowDown)),
                BareKey::Char('p') => Some(AppEvent::Widget(Event::ArrowUp)),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down => AppEvent::Widget(Event::ArrowDown),
            BareKey::Up => AppEvent::Widget(Event::ArrowUp),
            BareKey::Enter => AppEvent::Widget(Event::Enter),
            BareKey::Esc => AppEvent::Dismiss,
            BareKey::Backspace => AppEvent::Widget(Event::Backspace),
            BareKey::Delete => AppEvent::Widget(Event::Clear),
            BareKey::Char(c) => AppEvent::Widget(Event::Char(c)),
            _ => return None,
        })
    }

    /// Zellij reports 0-based lines and columns; the view model is 1-based.
    fn map_mouse_event(mouse: Mouse) -> Option<AppEvent> {
        match mouse {
            Mouse::LeftClick(line, col) => Some(AppEvent::Click {
                row: usize::try_from(line).ok()? + 1,
                col: col + 1,
            }),
            Mouse::Hover(line, col) => Some(AppEvent::Hover {
                row: usize::try_from(line).ok()? + 1,
                col: col + 1,
            }),
            Mouse::ScrollDown(_) => Some(AppEvent::Widget(Event::ArrowDown)),
            Mouse::ScrollUp(_) => Some(AppEvent::Widget(Event::ArrowUp)),
            _ => None,
        }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<AppEvent> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(AppEvent::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => post_message_to(PluginMessage {
                worker_name: Some(WORKER_NAME.to_string()),
                name: WORKER_NAME.to_string(),
                payload,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker message"),
        }
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &HostAction) {
        match action {
            HostAction::CloseFocus => hide_self(),
            HostAction::PostToWorker(message) => Self::post_worker_message(message),
        }
    }
}
