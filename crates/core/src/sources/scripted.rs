//! Scripted search source for tests and demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::search::source::{SearchSource, SourceError};

#[derive(Clone)]
struct Script<T> {
    delay: Duration,
    result: Result<Vec<T>, SourceError>,
}

/// Record of the queries a [`ScriptedSource`] was asked, in call order.
#[derive(Clone, Default)]
pub struct CallLog {
    queries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    fn record(&self, query: &str) {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.to_string());
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self) -> usize {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Answers each query with a canned response after a canned delay.
///
/// Unscripted queries answer with no candidates after the default delay.
#[derive(Clone)]
pub struct ScriptedSource<T> {
    scripts: HashMap<String, Script<T>>,
    default_delay: Duration,
    calls: CallLog,
}

impl<T> Default for ScriptedSource<T> {
    fn default() -> Self {
        Self {
            scripts: HashMap::new(),
            default_delay: Duration::ZERO,
            calls: CallLog::default(),
        }
    }
}

impl<T> ScriptedSource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay applied to queries scripted without one.
    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn respond(self, query: &str, items: Vec<T>) -> Self {
        let delay = self.default_delay;
        self.respond_after(query, delay, items)
    }

    pub fn respond_after(mut self, query: &str, delay: Duration, items: Vec<T>) -> Self {
        self.scripts.insert(
            query.to_string(),
            Script {
                delay,
                result: Ok(items),
            },
        );
        self
    }

    pub fn fail(mut self, query: &str, error: SourceError) -> Self {
        let delay = self.default_delay;
        self.scripts.insert(
            query.to_string(),
            Script {
                delay,
                result: Err(error),
            },
        );
        self
    }

    /// Shared handle on the call record; stays valid after the source is
    /// moved into a control.
    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }
}

#[async_trait]
impl<T> SearchSource<T> for ScriptedSource<T>
where
    T: Clone + Send + Sync,
{
    async fn search(&self, query: &str) -> Result<Vec<T>, SourceError> {
        self.calls.record(query);

        let (delay, result) = match self.scripts.get(query) {
            Some(script) => (script.delay, script.result.clone()),
            None => (self.default_delay, Ok(Vec::new())),
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}
