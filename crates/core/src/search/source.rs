//! The lookup capability consumed by a search-select control.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Search source not available: {0}")]
    Unavailable(String),
    #[error("Search request failed: {0}")]
    Request(String),
    #[error("Failed to decode search response: {0}")]
    Decode(String),
}

/// Remote (or local) lookup of candidates for a query string.
///
/// Implementations must be safe to call repeatedly and concurrently: a
/// control may have several lookups outstanding while the user types, and
/// only the most recent one is ever used.
#[async_trait]
pub trait SearchSource<T>: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<T>, SourceError>;
}
