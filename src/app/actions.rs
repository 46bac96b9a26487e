//! Side effects requested by the application layer.
//!
//! [`HostAction`]s are what the Zellij shim in `main.rs` executes after an
//! event was handled: messages for the catalogue worker, or hiding the pane.

use crate::worker::WorkerMessage;

/// Commands for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    /// Hides the plugin pane.
    ///
    /// Sent when Escape is pressed while the dropdown is already closed.
    CloseFocus,

    /// Posts a request to the catalogue worker.
    PostToWorker(WorkerMessage),
}
