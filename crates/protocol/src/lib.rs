//! # vx-protocol
//!
//! Shared data models for vaxsearch.
//!
//! This crate defines the structures exchanged between the search-select
//! engine, the terminal front end and the dashboard's REST API:
//! - Global configuration and search settings from `.vaxsearch/config.toml`
//! - Search hits returned by the `/busca` endpoints
//! - Form drafts built from committed selections
//!
//! ## Modules
//!
//! - [`config_models`]: Global configuration from config.toml
//! - [`search_models`]: Debounce/gating settings and selection modes
//! - [`catalog_models`]: Vaccine and health unit search hits
//! - [`form_models`]: Owner-side form state
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, and uuid
//! - TypeScript generation: All types derive `TS` for the web dashboard
//! - Independent compilation: No dependencies on other vaxsearch crates

pub mod catalog_models;
pub mod config_models;
pub mod form_models;
pub mod search_models;

// Re-export all public types for convenience
pub use catalog_models::*;
pub use config_models::*;
pub use form_models::*;
pub use search_models::*;
