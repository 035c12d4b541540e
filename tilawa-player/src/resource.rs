//! Audio resource lifecycle
//!
//! At most one resource exists at a time. Every replacement releases the
//! previous resource before the engine is asked to load the next one.

use std::sync::mpsc;

use tracing::{debug, warn};

use crate::engine::{AudioEngine, EngineEvent, ResourceEvents, ResourceId};
use crate::error::EngineError;

/// The one resource currently owned by the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveResource {
    pub id: ResourceId,
    /// Verse index the resource was created for
    pub verse_index: usize,
}

/// Owns the engine and the single active resource
pub struct AudioResourceManager<E: AudioEngine> {
    engine: E,
    active: Option<ActiveResource>,
    next_id: u64,
    events_tx: mpsc::Sender<EngineEvent>,
}

impl<E: AudioEngine> AudioResourceManager<E> {
    pub fn new(engine: E, events_tx: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            engine,
            active: None,
            next_id: 1,
            events_tx,
        }
    }

    pub fn active(&self) -> Option<ActiveResource> {
        self.active
    }

    /// Whether `id` names the live resource
    pub fn is_current(&self, id: ResourceId) -> bool {
        self.active.is_some_and(|active| active.id == id)
    }

    /// Release the current resource (if any) and load a new one for `url`
    ///
    /// On load failure nothing is active afterwards.
    pub fn replace(&mut self, verse_index: usize, url: &str) -> Result<ResourceId, EngineError> {
        self.teardown();

        let id = ResourceId::new(self.next_id);
        self.next_id += 1;

        let events = ResourceEvents::new(id, self.events_tx.clone());
        self.engine.load(id, url, events)?;

        debug!(resource = %id, verse_index, url, "Created audio resource");
        self.active = Some(ActiveResource { id, verse_index });
        Ok(id)
    }

    /// Ask the engine to start the active resource
    pub fn start(&mut self) -> Option<ResourceId> {
        let active = self.active?;
        self.engine.start(active.id);
        Some(active.id)
    }

    /// Pause the active resource in place
    pub fn pause(&mut self) {
        if let Some(active) = self.active {
            self.engine.pause(active.id);
        }
    }

    /// Stop and release the active resource
    pub fn teardown(&mut self) {
        if let Some(active) = self.active.take() {
            self.engine.release(active.id);
            debug!(resource = %active.id, "Released audio resource");
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

impl<E: AudioEngine> Drop for AudioResourceManager<E> {
    fn drop(&mut self) {
        if self.active.is_some() {
            warn!("Audio resource still active at session end, releasing");
            self.teardown();
        }
    }
}
