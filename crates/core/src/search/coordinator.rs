//! Fetch coordination with latest-request-wins semantics.
//!
//! The coordinator is the only writer of the result set. Each lookup gets a
//! fresh [`RequestId`]; the coordinator remembers the latest one it issued
//! and accepts a settlement only if it carries that id. Retiring the latest
//! id (on a new keystroke, a commit, a dismiss...) turns whatever is still in
//! flight into a stale response that is dropped on arrival.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use crate::search::signal::{FetchOutcome, RequestId, Signal};
use crate::search::source::{SearchSource, SourceError};

/// Result of handing a settled lookup to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Results replaced with `count` candidates.
    Applied { count: usize },
    /// The source failed; results cleared.
    Failed(SourceError),
    /// The source timed out; results cleared.
    TimedOut,
    /// The lookup was superseded; nothing changed.
    Stale,
}

pub struct FetchCoordinator<T> {
    source: Arc<dyn SearchSource<T>>,
    timeout: Duration,
    issued: u64,
    latest: Option<RequestId>,
    latest_query: String,
    answered: Option<String>,
    results: Vec<T>,
}

impl<T> FetchCoordinator<T>
where
    T: Send + 'static,
{
    pub fn new(source: Arc<dyn SearchSource<T>>, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            issued: 0,
            latest: None,
            latest_query: String::new(),
            answered: None,
            results: Vec::new(),
        }
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Start a lookup for `query` on a background task.
    ///
    /// The task posts [`Signal::FetchSettled`] when the source answers, fails
    /// or exceeds the timeout. Must be called from within a Tokio runtime.
    pub fn issue(&mut self, query: &str, signals: &UnboundedSender<Signal<T>>) -> RequestId {
        self.issued += 1;
        let request = RequestId(self.issued);
        self.latest = Some(request);
        self.latest_query = query.to_string();

        let source = Arc::clone(&self.source);
        let signals = signals.clone();
        let timeout = self.timeout;
        let query = query.to_string();
        tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, source.search(&query)).await {
                Ok(Ok(items)) => FetchOutcome::Loaded(items),
                Ok(Err(err)) => FetchOutcome::Failed(err),
                Err(_) => FetchOutcome::TimedOut,
            };
            let _ = signals.send(Signal::FetchSettled {
                request,
                query,
                outcome,
            });
        });

        request
    }

    /// The lookup whose settlement would currently be accepted.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.latest
    }

    /// Stop waiting for the in-flight lookup, if any.
    pub fn retire(&mut self) -> Option<RequestId> {
        self.latest.take()
    }

    /// Apply a settled lookup if it is still the latest one issued.
    pub fn settle(&mut self, request: RequestId, outcome: FetchOutcome<T>) -> Settlement {
        if self.latest != Some(request) {
            return Settlement::Stale;
        }
        self.latest = None;
        self.answered = Some(std::mem::take(&mut self.latest_query));

        match outcome {
            FetchOutcome::Loaded(items) => {
                let count = items.len();
                self.results = items;
                Settlement::Applied { count }
            }
            FetchOutcome::Failed(err) => {
                self.results.clear();
                Settlement::Failed(err)
            }
            FetchOutcome::TimedOut => {
                self.results.clear();
                Settlement::TimedOut
            }
        }
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// Query the current results answer, if any.
    pub fn answered_query(&self) -> Option<&str> {
        self.answered.as_deref()
    }

    pub fn clear(&mut self) {
        self.results.clear();
        self.answered = None;
    }
}
