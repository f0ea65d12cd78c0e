//! Observable state of a search-select control.

use crate::search::signal::RequestId;

/// Where a control is in its search/commit cycle.
///
/// Loading is not a separate flag: a control is loading exactly when it is
/// in [`Phase::Fetching`], so "loading while committed" cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing pending.
    #[default]
    Idle,
    /// Waiting for the input to go quiet.
    Debouncing,
    /// A lookup is in flight.
    Fetching { request: RequestId },
    /// The latest lookup has settled and its results are available.
    Showing,
    /// An item is held as the selection.
    Committed,
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Fetching { .. })
    }
}

/// What the results popup should display.
#[derive(Debug, PartialEq, Eq)]
pub enum PopupView<'a, T> {
    /// Popup not shown.
    Hidden,
    /// Candidate rows, in source order.
    Candidates(&'a [T]),
    /// The "no results found" message.
    NoResults,
}
