//! Messages posted back to a control by its timer and lookup tasks.
//!
//! Background tasks never touch control state. They post a [`Signal`] and
//! the owner's event loop hands it to [`SearchSelect::apply`], which checks
//! whether the signal is still current and writes the result in one step.
//!
//! [`SearchSelect::apply`]: crate::search::SearchSelect::apply

use std::fmt;

use crate::search::source::SourceError;

/// Sequence number of an issued lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub(crate) u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a lookup ended.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// The source answered with these candidates (possibly none).
    Loaded(Vec<T>),
    /// The source returned an error.
    Failed(SourceError),
    /// The source did not answer within the configured timeout.
    TimedOut,
}

#[derive(Debug)]
pub enum Signal<T> {
    /// The debounce window armed with `generation` has elapsed.
    DebounceElapsed { generation: u64 },
    /// The lookup `request` for `query` has settled.
    FetchSettled {
        request: RequestId,
        query: String,
        outcome: FetchOutcome<T>,
    },
}
