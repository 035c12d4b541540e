//! Verse-list provider for tilawa
//!
//! Blocking client for the AlQuran Cloud API: the chapter listing and, per
//! chapter, verse text paired with a reciter's audio URLs.
//!
//! # Quick Start
//!
//! ```no_run
//! use tilawa_api::{QuranClient, DEFAULT_RECITER};
//!
//! let client = QuranClient::new();
//! for chapter in client.chapter_list() {
//!     println!("{} {} ({} verses)", chapter.number, chapter.english_name, chapter.verse_count);
//! }
//!
//! let verses = client.verses(1, DEFAULT_RECITER)?;
//! assert_eq!(verses.len(), 7);
//! # Ok::<(), tilawa_api::ApiError>(())
//! ```
//!
//! `chapter_list()` and `verse_list()` never fail: they log and return an
//! empty list, which is what the reading view expects from its provider.

mod client;
mod error;
mod model;
mod reciters;

pub use client::{ClientConfig, QuranClient, DEFAULT_BASE_URL, DEFAULT_TEXT_EDITION};
pub use error::{ApiError, Result};
pub use model::{
    filter_chapters, total_verses, ChapterRef, Revelation, Verse, CHAPTER_COUNT,
    DEFAULT_TOTAL_VERSES,
};
pub use reciters::{find_reciter, Reciter, AVAILABLE_RECITERS, DEFAULT_RECITER};
