//! Configuration loading and management.
//!
//! Settings come from `.vaxsearch/config.toml` and searchable data from
//! `.vaxsearch/catalogs/`, with a catalog compiled into the binary as the
//! fallback.

pub mod defaults;
pub mod error;
pub mod loader;
pub mod models;
