//! TUI widgets module.

pub mod draft_view;
pub mod search_select;

pub use search_select::{Hit, SearchSelectRegions, SearchSelectView};
