//! # vx-core
//!
//! Debounced asynchronous search-select engine.
//!
//! This crate provides:
//! - The headless [`SearchSelect`](search::SearchSelect) control: debounce,
//!   minimum-length gate, latest-request-wins fetching and commit policy
//! - Search sources over closures, in-memory catalogs and scripts
//! - Configuration loading from the `.vaxsearch/` directory
//!
//! ## Modules
//!
//! - [`search`]: the control and its building blocks
//! - [`sources`]: `SearchSource` implementations
//! - [`config`]: configuration loading and management

pub mod config;
pub mod search;
pub mod sources;
