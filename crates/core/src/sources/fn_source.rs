//! Closure-backed search source.

use async_trait::async_trait;
use std::future::Future;

use crate::search::source::{SearchSource, SourceError};

/// Wraps an async function of the query string.
///
/// ```rust
/// use vx_core::search::SourceError;
/// use vx_core::sources::FnSource;
///
/// let source = FnSource::new(|query: String| async move {
///     Ok::<_, SourceError>(vec![query.to_uppercase()])
/// });
/// ```
#[derive(Clone)]
pub struct FnSource<F> {
    fetch: F,
}

impl<F> FnSource<F> {
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

#[async_trait]
impl<T, F, Fut> SearchSource<T> for FnSource<F>
where
    T: Send + 'static,
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>, SourceError>> + Send,
{
    async fn search(&self, query: &str) -> Result<Vec<T>, SourceError> {
        (self.fetch)(query.to_string()).await
    }
}
