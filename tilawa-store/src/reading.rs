//! Typed access to the reader's persisted state

use std::cmp::Reverse;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::backend::KeyValueStore;
use crate::error::{Result, StoreError};
use crate::records::{now_millis, reading_progress, Bookmark, LastRead, VerseKey};

pub const BOOKMARKS_KEY: &str = "quran_bookmarks";
pub const LAST_READ_KEY: &str = "quran_last_read";
pub const RECITER_KEY: &str = "quran_reciter";
pub const PROGRESS_KEY: &str = "quran_progress";

/// Bookmarks, last-read marker and preferences over any [`KeyValueStore`]
///
/// Every mutation is written through immediately; nothing is cached, so two
/// `ReadingStore`s over the same backend always agree.
///
/// Read-modify-write updates (bookmark toggles) are serialized across a
/// `ReadingStore` and its clones. Separately constructed stores over the same
/// backend are not coordinated: keep one writer per backend.
#[derive(Debug, Clone)]
pub struct ReadingStore<S> {
    backend: S,
    write_lock: Arc<Mutex<()>>,
}

impl<S: KeyValueStore> ReadingStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    // ------------------------------------------------------------------------
    // Bookmarks
    // ------------------------------------------------------------------------

    /// All bookmarks, newest first
    pub fn bookmarks(&self) -> Result<Vec<Bookmark>> {
        let mut bookmarks = self.stored_bookmarks()?;
        // Later insertions win timestamp ties
        bookmarks.reverse();
        bookmarks.sort_by_key(|b| Reverse(b.timestamp));
        Ok(bookmarks)
    }

    pub fn is_bookmarked(&self, key: VerseKey) -> Result<bool> {
        let id = key.to_string();
        Ok(self.stored_bookmarks()?.iter().any(|b| b.id == id))
    }

    /// Flip membership of `key` in the bookmark set
    ///
    /// Returns `true` when the verse is bookmarked after the call.
    pub fn toggle_bookmark(&self, key: VerseKey, chapter_name: &str, text: &str) -> Result<bool> {
        let _guard = self.write_lock.lock();
        let id = key.to_string();
        let mut bookmarks = self.stored_bookmarks()?;

        let before = bookmarks.len();
        bookmarks.retain(|b| b.id != id);
        let added = bookmarks.len() == before;

        if added {
            bookmarks.push(Bookmark {
                id,
                chapter: key.chapter,
                chapter_name: chapter_name.to_string(),
                verse: key.verse,
                text: text.to_string(),
                timestamp: now_millis(),
            });
        }

        self.write_json(BOOKMARKS_KEY, &bookmarks)?;
        debug!(verse = %key, bookmarked = added, "Toggled bookmark");
        Ok(added)
    }

    fn stored_bookmarks(&self) -> Result<Vec<Bookmark>> {
        Ok(self.read_json(BOOKMARKS_KEY)?.unwrap_or_default())
    }

    // ------------------------------------------------------------------------
    // Last read
    // ------------------------------------------------------------------------

    pub fn last_read(&self) -> Result<Option<LastRead>> {
        self.read_json(LAST_READ_KEY)
    }

    /// Overwrite the last-read marker with `key`
    pub fn mark_last_read(&self, key: VerseKey, chapter_name: &str) -> Result<LastRead> {
        let marker = LastRead {
            chapter: key.chapter,
            chapter_name: chapter_name.to_string(),
            verse: key.verse,
            timestamp: now_millis(),
        };
        self.write_json(LAST_READ_KEY, &marker)?;
        debug!(verse = %key, "Updated last-read marker");
        Ok(marker)
    }

    // ------------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------------

    /// Selected reciter, stored as a bare string
    pub fn reciter(&self) -> Result<Option<String>> {
        Ok(self
            .backend
            .get(RECITER_KEY)?
            .filter(|value| !value.is_empty()))
    }

    pub fn set_reciter(&self, reciter: &str) -> Result<()> {
        self.backend.set(RECITER_KEY, reciter)
    }

    /// Progress percentage for the current marker, 0 without one
    pub fn progress(&self, verse_counts: &[u16], total: u32) -> Result<f64> {
        Ok(self
            .last_read()?
            .map(|marker| reading_progress(&marker, verse_counts, total))
            .unwrap_or(0.0))
    }

    /// Compute and persist the progress percentage
    pub fn record_progress(&self, verse_counts: &[u16], total: u32) -> Result<f64> {
        let progress = self.progress(verse_counts, total)?;
        self.backend.set(PROGRESS_KEY, &progress.to_string())?;
        Ok(progress)
    }

    /// Last persisted progress percentage
    pub fn recorded_progress(&self) -> Result<Option<f64>> {
        Ok(self
            .backend
            .get(PROGRESS_KEY)?
            .and_then(|raw| raw.trim().parse().ok()))
    }

    // ------------------------------------------------------------------------
    // JSON helpers
    // ------------------------------------------------------------------------

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &raw)
    }
}
