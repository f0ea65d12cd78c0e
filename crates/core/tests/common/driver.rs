//! Helpers that drive a control's signals under paused Tokio time.

use std::time::Duration;
use tokio::time::timeout;
use vx_core::search::SearchSelect;

/// Longest quiet period after which a control is considered settled.
const QUIET: Duration = Duration::from_secs(60);

/// Apply signals until none arrives for a minute of (virtual) time.
///
/// Returns the number of signals applied.
#[allow(dead_code)]
pub async fn drain<T>(field: &mut SearchSelect<T>) -> usize
where
    T: Clone + Send + 'static,
{
    let mut applied = 0;
    while let Ok(Some(signal)) = timeout(QUIET, field.next_signal()).await {
        field.apply(signal);
        applied += 1;
    }
    applied
}

/// Wait for exactly one signal and apply it.
#[allow(dead_code)]
pub async fn step<T>(field: &mut SearchSelect<T>) -> bool
where
    T: Clone + Send + 'static,
{
    match timeout(QUIET, field.next_signal()).await {
        Ok(Some(signal)) => field.apply(signal),
        _ => panic!("Expected a signal"),
    }
}

/// Type `text` one character at a time, `gap` apart.
#[allow(dead_code)]
pub async fn type_slowly<T>(field: &mut SearchSelect<T>, text: &str, gap: Duration)
where
    T: Clone + Send + 'static,
{
    for c in text.chars() {
        field.push_char(c);
        tokio::time::advance(gap).await;
    }
}
