//! Application layer between the Zellij shim and the widget.
//!
//! ```text
//! Zellij event → AppEvent → handle_app_event → combobox::handle_event → HostAction
//!                    ↑                                                     ↓
//!                    └──────────────── worker responses ───────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects executed by the plugin runtime
//! - [`handler`]: Plugin event processing and widget action execution
//! - [`state`]: Widget, theme, catalogue and last drawn frame

pub mod actions;
pub mod handler;
pub mod state;

pub use actions::HostAction;
pub use handler::{handle_app_event, AppEvent};
pub use state::AppState;
