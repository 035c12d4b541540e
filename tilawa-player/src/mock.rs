//! Recording engine for tests
//!
//! `MockEngine` records every call, tracks which resources are live, and lets
//! a test fire engine signals for any resource, including ones that were
//! already released. Clones share state, so a test can keep a handle while
//! the sequencer owns another.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tilawa_api::Verse;

use crate::engine::{AudioEngine, ResourceEvents, ResourceId};
use crate::error::EngineError;

/// A call made on the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Load(ResourceId, String),
    Start(ResourceId),
    Pause(ResourceId),
    Release(ResourceId),
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<EngineCall>,
    sinks: HashMap<ResourceId, ResourceEvents>,
    live: HashSet<ResourceId>,
    max_live: usize,
    auto_confirm: bool,
    reject_starts: Option<String>,
    failing_urls: HashSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    state: Arc<Mutex<MockState>>,
}

impl MockEngine {
    /// Engine whose starts stay pending until the test answers them
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that confirms every start immediately
    pub fn auto_confirming() -> Self {
        let engine = Self::default();
        engine.state.lock().auto_confirm = true;
        engine
    }

    /// In auto-confirm mode, reject starts with `reason` instead
    pub fn reject_all_starts(&self, reason: impl Into<String>) {
        self.state.lock().reject_starts = Some(reason.into());
    }

    /// Make `load` fail for `url`
    pub fn fail_loads_for(&self, url: &str) {
        self.state.lock().failing_urls.insert(url.to_string());
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.lock().calls.clone()
    }

    /// Number of `Load` calls so far
    pub fn load_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, EngineCall::Load(..)))
            .count()
    }

    /// Id of the most recently loaded resource
    pub fn last_loaded(&self) -> Option<ResourceId> {
        self.state.lock().calls.iter().rev().find_map(|call| match call {
            EngineCall::Load(id, _) => Some(*id),
            _ => None,
        })
    }

    /// URL of the most recently loaded resource
    pub fn last_loaded_url(&self) -> Option<String> {
        self.state.lock().calls.iter().rev().find_map(|call| match call {
            EngineCall::Load(_, url) => Some(url.clone()),
            _ => None,
        })
    }

    /// Resources loaded and not yet released
    pub fn live_resources(&self) -> usize {
        self.state.lock().live.len()
    }

    /// Highest number of simultaneously live resources ever observed
    pub fn max_live(&self) -> usize {
        self.state.lock().max_live
    }

    pub fn confirm_start(&self, id: ResourceId) {
        if let Some(sink) = self.sink(id) {
            sink.started();
        }
    }

    pub fn reject_start(&self, id: ResourceId, reason: &str) {
        if let Some(sink) = self.sink(id) {
            sink.start_rejected(reason);
        }
    }

    pub fn complete(&self, id: ResourceId) {
        if let Some(sink) = self.sink(id) {
            sink.completed();
        }
    }

    pub fn fail(&self, id: ResourceId, reason: &str) {
        if let Some(sink) = self.sink(id) {
            sink.failed(reason);
        }
    }

    fn sink(&self, id: ResourceId) -> Option<ResourceEvents> {
        self.state.lock().sinks.get(&id).cloned()
    }
}

impl AudioEngine for MockEngine {
    fn load(&mut self, id: ResourceId, url: &str, events: ResourceEvents) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        if state.failing_urls.contains(url) {
            return Err(EngineError::Load {
                url: url.to_string(),
                reason: "unsupported source".to_string(),
            });
        }

        state.calls.push(EngineCall::Load(id, url.to_string()));
        state.sinks.insert(id, events);
        state.live.insert(id);
        state.max_live = state.max_live.max(state.live.len());
        Ok(())
    }

    fn start(&mut self, id: ResourceId) {
        let mut state = self.state.lock();
        state.calls.push(EngineCall::Start(id));
        if state.auto_confirm {
            if let Some(sink) = state.sinks.get(&id) {
                match &state.reject_starts {
                    Some(reason) => sink.start_rejected(reason.clone()),
                    None => sink.started(),
                }
            }
        }
    }

    fn pause(&mut self, id: ResourceId) {
        self.state.lock().calls.push(EngineCall::Pause(id));
    }

    fn release(&mut self, id: ResourceId) {
        let mut state = self.state.lock();
        state.calls.push(EngineCall::Release(id));
        state.live.remove(&id);
    }
}

/// `count` verses with distinct https audio URLs
pub fn verses(count: usize) -> Vec<Verse> {
    (0..count)
        .map(|i| Verse {
            number: i as u32 + 1,
            number_in_chapter: i as u16 + 1,
            text: format!("verse {}", i + 1),
            audio: Some(format!("https://cdn.example.org/audio/{}.mp3", i + 1)),
            audio_secondary: Vec::new(),
            juz: 1,
            page: 1,
        })
        .collect()
}
