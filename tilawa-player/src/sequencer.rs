//! Ayah playback sequencer
//!
//! Drives audio through a chapter's verses: one verse at a time, advancing on
//! natural completion, restarting the same verse in repeat-one mode, and
//! stopping at either end of the list.
//!
//! # State machine
//!
//! ```text
//!            play(i) / toggle()
//!   Idle ─────────────────────────▶ Cued (starting)
//!    ▲                                 │ Started
//!    │ stop / out of range             ▼
//!    │ load_chapter            ┌─▶ CuedPlaying ──Completed──▶ play(next)
//!    │                         │       │ toggle / StartRejected / Failed
//!    └──────────────────────── │ ──────▼
//!                              └── CuedPaused
//!                       toggle
//! ```
//!
//! All transitions run on the caller's thread. Engine signals are queued on
//! an internal channel and applied by [`AyahSequencer::pump`] (or directly
//! through [`AyahSequencer::handle_event`]). Signals for a resource that has
//! since been replaced are dropped.

use std::sync::mpsc;

use tilawa_api::Verse;
use tracing::{debug, warn};

use crate::advance::AdvancePolicy;
use crate::changes::{ChangeEmitter, ChangeIterator, PlaybackChange};
use crate::engine::{AudioEngine, EngineEvent, EngineEventKind};
use crate::model::{PlaybackSnapshot, PlaybackStatus};
use crate::resource::AudioResourceManager;

/// Playback state and audio lifecycle for one reading view
pub struct AyahSequencer<E: AudioEngine> {
    verses: Vec<Verse>,
    current_index: Option<usize>,
    is_playing: bool,
    repeat_one: bool,
    /// Set between a start request and the engine's answer
    start_pending: bool,
    resources: AudioResourceManager<E>,
    events_rx: mpsc::Receiver<EngineEvent>,
    changes: ChangeEmitter,
}

impl<E: AudioEngine> AyahSequencer<E> {
    pub fn new(engine: E) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            verses: Vec::new(),
            current_index: None,
            is_playing: false,
            repeat_one: false,
            start_pending: false,
            resources: AudioResourceManager::new(engine, events_tx),
            events_rx,
            changes: ChangeEmitter::new(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from_parts(self.current_index, self.is_playing)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            status: self.status(),
            current_index: self.current_index,
            is_playing: self.is_playing,
            repeat_one: self.repeat_one,
            starting: self.start_pending,
            verse_count: self.verses.len(),
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn repeat_one(&self) -> bool {
        self.repeat_one
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn current_verse(&self) -> Option<&Verse> {
        self.current_index.and_then(|index| self.verses.get(index))
    }

    /// Handle for consuming change notifications
    pub fn changes(&self) -> ChangeIterator {
        self.changes.iter()
    }

    pub fn engine(&self) -> &E {
        self.resources.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.resources.engine_mut()
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Replace the verse list and return to Idle
    ///
    /// The active resource is released before the new list is installed.
    pub fn load_chapter(&mut self, verses: Vec<Verse>) {
        self.stop();
        self.verses = verses;
        debug!(verse_count = self.verses.len(), "Loaded chapter");
        self.changes.emit(PlaybackChange::ChapterLoaded {
            verse_count: self.verses.len(),
        });
    }

    /// Cue `index` and request playback from its beginning
    ///
    /// Out-of-range indexes (negative or past the end) stop playback. A verse
    /// without audio leaves the state untouched.
    pub fn play(&mut self, index: i64) {
        let Some(index) = AdvancePolicy::resolve(index, self.verses.len()) else {
            debug!(requested = index, verse_count = self.verses.len(), "Play request outside verse list, stopping");
            self.stop();
            return;
        };

        let Some(url) = self.verses[index]
            .audio
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(str::to_owned)
        else {
            debug!(index, "Verse has no audio, ignoring play request");
            return;
        };

        self.start_pending = false;
        self.set_playing(false);

        match self.resources.replace(index, &url) {
            Ok(_) => {
                self.set_index(Some(index));
                self.start_pending = true;
                self.resources.start();
            }
            Err(e) => {
                warn!(index, error = %e, "Audio engine could not load verse");
                self.set_index(Some(index));
            }
        }
    }

    /// Pause when playing (or starting), resume when paused, start at the
    /// first verse when Idle
    pub fn toggle(&mut self) {
        let Some(index) = self.current_index else {
            self.play(0);
            return;
        };

        if self.resources.active().is_none() {
            // Resource was released after a failure; recreate it
            self.play(index as i64);
        } else if self.is_playing || self.start_pending {
            self.start_pending = false;
            self.resources.pause();
            self.set_playing(false);
        } else {
            self.start_pending = true;
            self.resources.start();
        }
    }

    /// Skip to the following verse
    pub fn next(&mut self) {
        self.play(AdvancePolicy::next(self.current_index));
    }

    /// Skip to the preceding verse
    pub fn previous(&mut self) {
        self.play(AdvancePolicy::previous(self.current_index));
    }

    /// Release audio and return to Idle
    pub fn stop(&mut self) {
        self.resources.teardown();
        self.start_pending = false;
        self.set_playing(false);
        self.set_index(None);
    }

    /// Set repeat-one mode; never starts or stops audio by itself
    pub fn set_repeat(&mut self, repeat_one: bool) {
        if self.repeat_one != repeat_one {
            self.repeat_one = repeat_one;
            self.changes.emit(PlaybackChange::RepeatChanged(repeat_one));
        }
    }

    // ========================================================================
    // Engine signals
    // ========================================================================

    /// Apply every queued engine signal; returns how many were applied
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.handle_event(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Apply one engine signal
    ///
    /// Returns `false` when the signal was ignored: it names a resource that
    /// is no longer current, or it does not fit the current state.
    pub fn handle_event(&mut self, event: EngineEvent) -> bool {
        if !self.resources.is_current(event.resource) {
            debug!(resource = %event.resource, kind = ?event.kind, "Dropping signal from superseded resource");
            return false;
        }

        match event.kind {
            EngineEventKind::Started => {
                if self.start_pending {
                    self.start_pending = false;
                    self.set_playing(true);
                    true
                } else if !self.is_playing {
                    // Paused while the start was in flight
                    debug!(resource = %event.resource, "Start confirmed after pause, pausing again");
                    self.resources.pause();
                    false
                } else {
                    false
                }
            }
            EngineEventKind::StartRejected(reason) => {
                if !self.start_pending {
                    return false;
                }
                warn!(resource = %event.resource, reason = %reason, "Playback start rejected");
                self.start_pending = false;
                self.set_playing(false);
                true
            }
            EngineEventKind::Completed => {
                if self.is_playing {
                    self.on_natural_completion();
                    true
                } else {
                    false
                }
            }
            EngineEventKind::Failed(reason) => {
                warn!(resource = %event.resource, reason = %reason, "Playback failed");
                self.resources.teardown();
                self.start_pending = false;
                self.set_playing(false);
                true
            }
        }
    }

    fn on_natural_completion(&mut self) {
        let Some(current) = self.current_index else {
            return;
        };
        let next = AdvancePolicy::after_completion(current, self.repeat_one);
        debug!(current, next, repeat_one = self.repeat_one, "Verse finished");

        let target_silent = AdvancePolicy::resolve(next, self.verses.len())
            .is_some_and(|target| !self.verses[target].has_audio());
        if target_silent {
            // Stay cued on the finished verse, paused
            debug!(current, next, "Next verse has no audio, pausing on the finished verse");
            self.resources.teardown();
            self.start_pending = false;
            self.set_playing(false);
            return;
        }

        self.play(next);
    }

    // ========================================================================
    // Change-detecting setters
    // ========================================================================

    fn set_index(&mut self, index: Option<usize>) {
        if self.current_index != index {
            self.current_index = index;
            self.changes.emit(PlaybackChange::IndexChanged(index));
        }
    }

    fn set_playing(&mut self, playing: bool) {
        debug_assert!(!playing || self.current_index.is_some());
        if self.is_playing != playing {
            self.is_playing = playing;
            self.changes.emit(PlaybackChange::PlayingChanged(playing));
        }
    }
}
