//! Audio engine seam
//!
//! The engine owns actual sound output. The sequencer talks to it through
//! [`AudioEngine`] and hears back through typed [`EngineEvent`]s, which the
//! engine sends on the [`ResourceEvents`] handle bound to each resource at
//! load time.
//!
//! ```text
//! AyahSequencer ──load/start/pause/release──▶ AudioEngine
//!       ▲                                          │
//!       └──────────── EngineEvent (mpsc) ◀─────────┘
//! ```

use std::fmt;
use std::sync::mpsc;

use crate::error::EngineError;

/// Identity of one created audio resource
///
/// Ids are never reused within a sequencer, so an event carrying an old id
/// can always be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(u64);

impl ResourceId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "res-{}", self.0)
    }
}

/// What happened to a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEventKind {
    /// An asynchronous start request succeeded
    Started,
    /// An asynchronous start request was refused (e.g. autoplay policy)
    StartRejected(String),
    /// Playback reached the end of the audio
    Completed,
    /// Playback failed while running
    Failed(String),
}

/// Signal from the engine about one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEvent {
    pub resource: ResourceId,
    pub kind: EngineEventKind,
}

/// Per-resource event handle given to the engine in [`AudioEngine::load`]
///
/// Sending after the sequencer is gone is silently ignored.
#[derive(Debug, Clone)]
pub struct ResourceEvents {
    resource: ResourceId,
    tx: mpsc::Sender<EngineEvent>,
}

impl ResourceEvents {
    pub(crate) fn new(resource: ResourceId, tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { resource, tx }
    }

    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    pub fn started(&self) {
        self.send(EngineEventKind::Started);
    }

    pub fn start_rejected(&self, reason: impl Into<String>) {
        self.send(EngineEventKind::StartRejected(reason.into()));
    }

    pub fn completed(&self) {
        self.send(EngineEventKind::Completed);
    }

    pub fn failed(&self, reason: impl Into<String>) {
        self.send(EngineEventKind::Failed(reason.into()));
    }

    fn send(&self, kind: EngineEventKind) {
        let _ = self.tx.send(EngineEvent {
            resource: self.resource,
            kind,
        });
    }
}

/// A sound backend able to play one URL per resource
///
/// `start` is asynchronous: its outcome arrives later as `Started` or
/// `StartRejected`. `release` must stop output immediately; a released
/// resource must never be heard again, even if events for it are still in
/// flight.
pub trait AudioEngine {
    /// Create a resource for `url`, binding `events` for its lifetime
    fn load(&mut self, id: ResourceId, url: &str, events: ResourceEvents) -> Result<(), EngineError>;

    /// Request playback from the current position
    fn start(&mut self, id: ResourceId);

    /// Pause in place
    fn pause(&mut self, id: ResourceId);

    /// Stop and free the resource
    fn release(&mut self, id: ResourceId);
}

impl<E: AudioEngine + ?Sized> AudioEngine for Box<E> {
    fn load(&mut self, id: ResourceId, url: &str, events: ResourceEvents) -> Result<(), EngineError> {
        (**self).load(id, url, events)
    }

    fn start(&mut self, id: ResourceId) {
        (**self).start(id)
    }

    fn pause(&mut self, id: ResourceId) {
        (**self).pause(id)
    }

    fn release(&mut self, id: ResourceId) {
        (**self).release(id)
    }
}
