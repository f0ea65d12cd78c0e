//! Event handling types for the TUI.
//!
//! Input handlers return [`EventStatus`] so the form can pass an event on
//! when the focused control did not use it (Backspace on an empty input
//! removes the last vaccine tag, for instance).

/// Status of an event after being handled by a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The event was handled and should not be propagated further.
    Consumed,
    /// The event was not handled and should be passed to the next handler.
    NotConsumed,
}

impl EventStatus {
    pub fn is_consumed(self) -> bool {
        self == EventStatus::Consumed
    }
}

impl From<bool> for EventStatus {
    fn from(consumed: bool) -> Self {
        if consumed {
            EventStatus::Consumed
        } else {
            EventStatus::NotConsumed
        }
    }
}

/// Form-level commands bound to keys regardless of the focused control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormCommand {
    NextField,
    PreviousField,
    /// Close the form and hand back the draft.
    Save,
    /// Close the form and discard the draft.
    Cancel,
}
