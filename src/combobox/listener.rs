//! Scoped outside-click listener.
//!
//! The dropdown must close when the user presses the pointer anywhere outside
//! the widget, but the listener doing so may only exist while the dropdown is
//! open. [`OutsideClickListener`] is a guard: the combobox acquires one when it
//! opens and drops it when it closes, so the listener cannot outlive the open
//! state.
//!
//! The listener is debounced by one pointer gesture: it is attached disarmed
//! and arms once a keyboard or host event has been processed, or when the host
//! starts the next gesture. A press that opened the dropdown therefore never
//! closes it again.

/// Guard representing an attached outside-click listener.
#[derive(Debug, PartialEq, Eq)]
pub struct OutsideClickListener {
    armed: bool,
}

impl OutsideClickListener {
    /// Attaches a new, disarmed listener.
    pub(crate) fn attach() -> Self {
        tracing::trace!("outside click listener attached");
        Self { armed: false }
    }

    /// Arms the listener.
    pub(crate) fn arm(&mut self) {
        self.armed = true;
    }

    /// Returns whether a pointer press outside the widget should close it.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Drop for OutsideClickListener {
    fn drop(&mut self) {
        tracing::trace!(armed = self.armed, "outside click listener detached");
    }
}
