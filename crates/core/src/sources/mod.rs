//! Ready-made [`SearchSource`](crate::search::SearchSource) implementations.
//!
//! - [`FnSource`]: adapts an async closure ("fetch function")
//! - [`CatalogSource`]: in-memory catalog with `/busca`-style matching
//! - [`ScriptedSource`]: canned responses for tests and demos

pub mod catalog;
pub mod fn_source;
pub mod scripted;

pub use catalog::CatalogSource;
pub use fn_source::FnSource;
pub use scripted::{CallLog, ScriptedSource};
