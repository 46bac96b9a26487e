//! Headless combobox engine.
//!
//! The engine owns no rendering and no I/O. It turns an option list, a query and
//! a selection into visible entries, and turns [`Event`]s into state changes and
//! [`Action`]s for the host.
//!
//! ```text
//! Host input → Event → handle_event → Combobox mutations → Vec<Action> → Host
//!                                          ↓
//!                                   filter_options → VisibleResults → renderer
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Notifications for the host
//! - [`config`]: Behavioural switches
//! - [`filter`]: Matching, capping, grouping and the create entry
//! - [`handler`]: Keyboard and pointer state machine
//! - [`listener`]: Scoped outside-click listener
//! - [`state`]: The [`Combobox`] itself

pub mod actions;
pub mod config;
pub mod filter;
pub mod handler;
pub mod listener;
pub mod state;

pub use actions::Action;
pub use config::{ComboboxConfig, SelectionMode, DEFAULT_MAX_OPTIONS};
pub use filter::{filter_options, BoundMatcher, MatchFn, Matcher, OptionGroup, VisibleEntry, VisibleResults};
pub use handler::{handle_event, Event};
pub use listener::OutsideClickListener;
pub use state::{AccessibilityState, Combobox};
