//! Debounce timer for search input.
//!
//! Every keystroke re-arms the timer. Only the last arming of a burst ever
//! posts [`Signal::DebounceElapsed`]: earlier timer tasks are aborted, and a
//! generation counter rejects any signal that was already in the channel
//! when the timer was re-armed.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::search::signal::Signal;

pub struct Debouncer {
    window: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
        }
    }

    /// Whether a timer is armed and has not elapsed yet.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Arm (or re-arm) the timer.
    ///
    /// Must be called from within a Tokio runtime. Returns the generation
    /// the eventual [`Signal::DebounceElapsed`] will carry.
    pub fn restart<T>(&mut self, signals: &UnboundedSender<Signal<T>>) -> u64
    where
        T: Send + 'static,
    {
        self.cancel();

        let generation = self.generation;
        let deadline = Instant::now() + self.window;
        let signals = signals.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = signals.send(Signal::DebounceElapsed { generation });
        }));

        generation
    }

    /// Disarm the timer. Any signal already posted becomes stale.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Accept an elapsed signal if it belongs to the currently armed timer.
    pub fn take_elapsed(&mut self, generation: u64) -> bool {
        if self.pending.is_none() || generation != self.generation {
            return false;
        }
        self.pending = None;
        true
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
