//! Ayah Playback Sequencer
//!
//! Plays a chapter's recitation one verse at a time. The sequencer owns at
//! most one audio resource, advances on natural completion, restarts the same
//! verse in repeat-one mode, and stops at either end of the verse list.
//!
//! # Architecture
//!
//! ```text
//! view ──commands──▶ AyahSequencer ──load/start/pause/release──▶ AudioEngine
//!  ▲                     │    ▲                                      │
//!  └──PlaybackChange─────┘    └────────── EngineEvent ◀──────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tilawa_player::{AyahSequencer, PlaybackChange};
//!
//! let mut sequencer = AyahSequencer::new(engine);
//! sequencer.load_chapter(verses);
//! sequencer.play(0);
//!
//! // On every tick of the host loop
//! sequencer.pump();
//! for change in sequencer.changes().try_iter() {
//!     if let PlaybackChange::IndexChanged(Some(index)) = change {
//!         view.scroll_to(index);
//!     }
//! }
//! ```

pub mod advance;
pub mod changes;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod resource;
pub mod sequencer;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

#[cfg(test)]
mod properties;

pub use advance::AdvancePolicy;
pub use changes::{ChangeIterator, PlaybackChange, TimeoutIter, TryIter};
pub use engine::{AudioEngine, EngineEvent, EngineEventKind, ResourceEvents, ResourceId};
pub use error::EngineError;
pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};
pub use model::{PlaybackSnapshot, PlaybackStatus};
pub use resource::{ActiveResource, AudioResourceManager};
pub use sequencer::AyahSequencer;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AudioEngine, AyahSequencer, ChangeIterator, EngineEvent, EngineEventKind, PlaybackChange,
        PlaybackSnapshot, PlaybackStatus, ResourceEvents, ResourceId,
    };
}
