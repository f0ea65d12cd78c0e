//! Search-select settings models for the `[search]` table of `.vaxsearch/config.toml`.
//!
//! These are the tunables shared by every search-select control: how long the
//! input must stay quiet before a lookup, how many characters a query needs,
//! and how long a lookup may take before it is abandoned.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use ts_rs::TS;

/// Default minimum number of characters before a lookup is issued.
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 3;

/// Default quiet period, in milliseconds, before a lookup is issued.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Default lookup timeout in milliseconds.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Timing and gating settings for a search-select control.
///
/// # Example
///
/// ```toml
/// [search]
/// min_query_length = 3
/// debounce_ms = 500
/// fetch_timeout_ms = 10000
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(default)]
pub struct SearchSettings {
    /// Minimum query length (in characters) for a lookup to be issued.
    pub min_query_length: usize,

    /// Quiet period after the last keystroke before the query is looked up.
    pub debounce_ms: u64,

    /// Upper bound on a single lookup. A lookup that takes longer settles
    /// as an empty result.
    pub fetch_timeout_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

impl SearchSettings {
    /// The debounce window as a [`Duration`].
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// The lookup timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Whether `query` is long enough to be looked up.
    ///
    /// Length is counted in characters, not bytes, so accented names
    /// ("Hepatite B", "Tríplice") gate the same way as plain ASCII.
    pub fn accepts_query(&self, query: &str) -> bool {
        !query.is_empty() && query.chars().count() >= self.min_query_length
    }
}

/// What a search-select control does with its input after a commit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Keep the committed item in the input; searching resumes only after
    /// the user edits the input again.
    #[default]
    Persist,

    /// Reset the input right after each commit so another item can be
    /// searched. The owner accumulates the committed items.
    Tag,
}

impl SelectionMode {
    /// Map the `retain_after_commit` flag used by form call sites onto a mode.
    ///
    /// `true` selects [`SelectionMode::Tag`]: the control keeps accepting
    /// commits after each one instead of holding a single selection.
    pub fn from_retain_after_commit(retain_after_commit: bool) -> Self {
        if retain_after_commit {
            Self::Tag
        } else {
            Self::Persist
        }
    }

    /// Whether this mode holds on to the committed item.
    pub fn holds_selection(self) -> bool {
        matches!(self, Self::Persist)
    }
}
