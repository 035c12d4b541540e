//! Tilawa SDK
//!
//! Sync-first reading session for a Quran reader: fetch a chapter, recite it
//! verse by verse with auto-advance and repeat, and keep bookmarks and the
//! last-read position on the device.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tilawa_sdk::{ReadingSession, PlaybackChange};
//! use tilawa_store::FileStore;
//!
//! let mut session = ReadingSession::builder(engine, FileStore::default_location()?).build()?;
//!
//! // Pick up where the reader stopped
//! if let Some(index) = session.resume_last_read()? {
//!     view.scroll_to(index);
//! }
//!
//! session.toggle();
//! loop {
//!     session.pump();
//!     for change in session.changes().try_iter() {
//!         if let PlaybackChange::IndexChanged(Some(index)) = change {
//!             view.highlight(index);
//!         }
//!     }
//! }
//! ```

mod error;
mod session;

pub use error::{Result, SdkError};
pub use session::{OpenChapter, ReadingSession, ReadingSessionBuilder};

// Re-export commonly used types from the member crates
pub use tilawa_api::{
    ChapterRef, ClientConfig, QuranClient, Reciter, Verse, AVAILABLE_RECITERS, DEFAULT_RECITER,
};
pub use tilawa_player::{
    AudioEngine, AyahSequencer, ChangeIterator, EngineEvent, EngineEventKind, LoggingMode,
    PlaybackChange, PlaybackSnapshot, PlaybackStatus, ResourceEvents, ResourceId,
};
pub use tilawa_store::{Bookmark, FileStore, KeyValueStore, LastRead, MemoryStore, VerseKey};

/// Test doubles for applications embedding the SDK
#[cfg(feature = "test-support")]
pub mod test_support {
    pub use tilawa_player::mock::{verses, EngineCall, MockEngine};
}
