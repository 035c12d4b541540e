//! Playback change notifications
//!
//! The view layer consumes these to move the verse highlight, scroll, and
//! refresh transport controls. A change is only emitted when the value
//! actually differs from the previous one.
//!
//! Iteration patterns:
//! - Blocking: `recv()`, `for change in iter`
//! - Non-blocking: `try_recv()`, `try_iter()`
//! - Timeout: `recv_timeout()`, `timeout_iter()`

use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

/// A single observable state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackChange {
    /// A new verse list replaced the previous one
    ChapterLoaded { verse_count: usize },
    /// The cued verse changed; `None` means nothing is cued
    IndexChanged(Option<usize>),
    PlayingChanged(bool),
    RepeatChanged(bool),
}

/// Sending half, held by the sequencer
#[derive(Debug)]
pub(crate) struct ChangeEmitter {
    tx: mpsc::Sender<PlaybackChange>,
    rx: Arc<Mutex<mpsc::Receiver<PlaybackChange>>>,
}

impl ChangeEmitter {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    pub fn emit(&self, change: PlaybackChange) {
        let _ = self.tx.send(change);
    }

    pub fn iter(&self) -> ChangeIterator {
        ChangeIterator {
            rx: Arc::clone(&self.rx),
        }
    }
}

/// Iterator over playback changes
///
/// All handles returned by [`crate::AyahSequencer::changes`] share one queue:
/// each change is delivered to exactly one consumer.
///
/// # Example
///
/// ```rust,ignore
/// for change in sequencer.changes().try_iter() {
///     match change {
///         PlaybackChange::IndexChanged(Some(index)) => view.highlight(index),
///         PlaybackChange::IndexChanged(None) => view.clear_highlight(),
///         _ => view.refresh_controls(),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ChangeIterator {
    rx: Arc<Mutex<mpsc::Receiver<PlaybackChange>>>,
}

impl ChangeIterator {
    /// Block until the next change is available
    ///
    /// Returns `None` once the sequencer is dropped and the queue is drained.
    pub fn recv(&self) -> Option<PlaybackChange> {
        self.rx.lock().ok()?.recv().ok()
    }

    /// Block until the next change or timeout expires
    pub fn recv_timeout(&self, timeout: Duration) -> Option<PlaybackChange> {
        self.rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    /// Take a change without blocking
    pub fn try_recv(&self) -> Option<PlaybackChange> {
        self.rx.lock().ok()?.try_recv().ok()
    }

    /// Drain currently queued changes without blocking
    pub fn try_iter(&self) -> TryIter<'_> {
        TryIter { inner: self }
    }

    /// Blocking iterator that ends after `timeout` with no change
    pub fn timeout_iter(&self, timeout: Duration) -> TimeoutIter<'_> {
        TimeoutIter {
            inner: self,
            timeout,
        }
    }
}

impl Iterator for ChangeIterator {
    type Item = PlaybackChange;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}

pub struct TryIter<'a> {
    inner: &'a ChangeIterator,
}

impl Iterator for TryIter<'_> {
    type Item = PlaybackChange;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.try_recv()
    }
}

pub struct TimeoutIter<'a> {
    inner: &'a ChangeIterator,
    timeout: Duration,
}

impl Iterator for TimeoutIter<'_> {
    type Item = PlaybackChange;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.recv_timeout(self.timeout)
    }
}
