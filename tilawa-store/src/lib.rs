//! Persistence bridge for tilawa
//!
//! Stores the reader's bookmark set, last-read marker and preferences as JSON
//! records under fixed keys, scoped to the local device.
//!
//! # Quick Start
//!
//! ```rust
//! use tilawa_store::{MemoryStore, ReadingStore, VerseKey};
//!
//! let store = ReadingStore::new(MemoryStore::new());
//!
//! // Bookmarks are a set: toggling twice removes the entry again
//! assert!(store.toggle_bookmark(VerseKey::new(2, 255), "البقرة", "...").unwrap());
//! assert!(store.is_bookmarked(VerseKey::new(2, 255)).unwrap());
//!
//! // The last-read marker is a singleton
//! store.mark_last_read(VerseKey::new(18, 1), "الكهف").unwrap();
//! assert_eq!(store.last_read().unwrap().unwrap().chapter, 18);
//! ```
//!
//! On a real device, use [`FileStore::default_location`] instead of
//! [`MemoryStore`].

mod backend;
pub mod error;
mod reading;
mod records;

pub use backend::{FileStore, KeyValueStore, MemoryStore, APP_DIR_NAME};
pub use error::{Result, StoreError};
pub use reading::{ReadingStore, BOOKMARKS_KEY, LAST_READ_KEY, PROGRESS_KEY, RECITER_KEY};
pub use records::{reading_progress, Bookmark, LastRead, VerseKey};
