//! Debounced asynchronous search-select.
//!
//! - [`source`]: the lookup capability a control searches through
//! - [`debounce`]: keystroke debounce timer
//! - [`coordinator`]: latest-request-wins fetch coordination
//! - [`controller`]: the [`SearchSelect`] state machine

pub mod controller;
pub mod coordinator;
pub mod debounce;
pub mod phase;
pub mod signal;
pub mod source;

pub use controller::{CommitFn, DisplayFn, SearchSelect};
pub use phase::{Phase, PopupView};
pub use signal::{FetchOutcome, RequestId, Signal};
pub use source::{SearchSource, SourceError};
