//! Global configuration models for `.vaxsearch/config.toml`.

use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;
use ts_rs::TS;

use crate::search_models::SearchSettings;

/// Default simulated latency of the demo catalog source, in milliseconds.
pub const DEFAULT_SOURCE_LATENCY_MS: u64 = 250;

/// Represents global settings from `.vaxsearch/config.toml`.
///
/// Every table is optional; missing tables and keys fall back to defaults.
///
/// # Example
///
/// ```toml
/// # .vaxsearch/config.toml
/// [search]
/// min_query_length = 3
/// debounce_ms = 500
///
/// [source]
/// latency_ms = 250
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, TS)]
pub struct GlobalConfig {
    /// Settings shared by every search-select control.
    #[serde(default)]
    pub search: SearchSettings,

    /// Settings of the demo catalog source.
    #[serde(default)]
    pub source: SourceSettings,
}

/// Settings for the in-memory catalog source used by the demo.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(default)]
pub struct SourceSettings {
    /// Artificial delay applied to every lookup, mimicking a round trip to
    /// the dashboard API.
    pub latency_ms: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_SOURCE_LATENCY_MS,
        }
    }
}

impl SourceSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
