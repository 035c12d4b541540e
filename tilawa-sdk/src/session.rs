//! ReadingSession - one reader, one open chapter
//!
//! Joins the verse-list provider, the playback sequencer and the reading
//! store. Everything is synchronous and runs on the caller's thread.

use tilawa_api::{
    find_reciter, total_verses, ChapterRef, ClientConfig, QuranClient, Verse, CHAPTER_COUNT,
    DEFAULT_RECITER,
};
use tilawa_player::{AudioEngine, AyahSequencer, ChangeIterator, PlaybackSnapshot, PlaybackStatus};
use tilawa_store::{Bookmark, KeyValueStore, LastRead, ReadingStore, VerseKey};
use tracing::{debug, info, warn};

use crate::error::{Result, SdkError};

/// The chapter currently shown in the reading view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenChapter {
    pub number: u16,
    /// Arabic name, empty when the chapter listing was unavailable
    pub name: String,
}

/// Reading session over an audio engine `E` and a storage backend `S`
///
/// # Example
///
/// ```rust,ignore
/// use tilawa_sdk::ReadingSession;
/// use tilawa_store::FileStore;
///
/// let mut session = ReadingSession::builder(engine, FileStore::default_location()?).build()?;
/// session.open_chapter(18)?;
/// session.play(0);
///
/// loop {
///     session.pump();
///     for change in session.changes().try_iter() {
///         view.apply(change);
///     }
/// }
/// ```
pub struct ReadingSession<E: AudioEngine, S: KeyValueStore> {
    client: QuranClient,
    store: ReadingStore<S>,
    sequencer: AyahSequencer<E>,
    reciter: String,
    /// Chapter listing, fetched on first use
    chapters: Vec<ChapterRef>,
    open: Option<OpenChapter>,
}

impl<E: AudioEngine, S: KeyValueStore> ReadingSession<E, S> {
    pub fn builder(engine: E, store: S) -> ReadingSessionBuilder<E, S> {
        ReadingSessionBuilder::new(engine, store)
    }

    // ========================================================================
    // Chapter lifecycle
    // ========================================================================

    /// Fetch `chapter` for the selected reciter and load it into the sequencer
    ///
    /// The sequencer always returns to Idle. A provider failure loads an empty
    /// verse list. Returns the number of verses loaded.
    pub fn open_chapter(&mut self, chapter: u16) -> Result<usize> {
        if chapter == 0 || chapter > CHAPTER_COUNT {
            return Err(tilawa_api::ApiError::InvalidChapter(chapter).into());
        }

        let verses = self.client.verse_list(chapter, &self.reciter);
        let name = self
            .chapters()
            .iter()
            .find(|c| c.number == chapter)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        let count = verses.len();
        self.sequencer.load_chapter(verses);
        self.open = Some(OpenChapter {
            number: chapter,
            name,
        });
        info!(chapter, reciter = %self.reciter, verses = count, "Opened chapter");
        Ok(count)
    }

    /// Release audio and clear the verse list
    pub fn close_chapter(&mut self) {
        self.sequencer.load_chapter(Vec::new());
        if let Some(open) = self.open.take() {
            debug!(chapter = open.number, "Closed chapter");
        }
    }

    /// Persist `reciter` and reload the open chapter with its audio
    pub fn change_reciter(&mut self, reciter: &str) -> Result<()> {
        if find_reciter(reciter).is_none() {
            return Err(SdkError::UnknownReciter(reciter.to_string()));
        }

        self.store.set_reciter(reciter)?;
        self.reciter = reciter.to_string();

        if let Some(chapter) = self.open.as_ref().map(|open| open.number) {
            self.open_chapter(chapter)?;
        }
        Ok(())
    }

    /// Open the chapter named by the last-read marker
    ///
    /// Returns the verse index to scroll to, or `None` without a marker or
    /// when the marked verse is not in the loaded list.
    pub fn resume_last_read(&mut self) -> Result<Option<usize>> {
        let Some(marker) = self.store.last_read()? else {
            return Ok(None);
        };

        self.open_chapter(marker.chapter)?;
        Ok(self
            .sequencer
            .verses()
            .iter()
            .position(|verse| verse.number_in_chapter == marker.verse))
    }

    // ========================================================================
    // Last-read and bookmarks
    // ========================================================================

    /// Record the verse at `verse_index` of the open chapter as last read
    pub fn mark_last_read(&self, verse_index: usize) -> Result<LastRead> {
        let (key, name, _) = self.locate(verse_index)?;
        Ok(self.store.mark_last_read(key, &name)?)
    }

    /// Toggle the bookmark on the verse at `verse_index`; returns the new state
    pub fn toggle_bookmark(&self, verse_index: usize) -> Result<bool> {
        let (key, name, text) = self.locate(verse_index)?;
        Ok(self.store.toggle_bookmark(key, &name, &text)?)
    }

    pub fn is_bookmarked(&self, verse_index: usize) -> Result<bool> {
        let (key, _, _) = self.locate(verse_index)?;
        Ok(self.store.is_bookmarked(key)?)
    }

    /// Mark the cued verse as last read; `None` when nothing is cued
    pub fn mark_current_last_read(&self) -> Result<Option<LastRead>> {
        match self.sequencer.current_index() {
            Some(index) => self.mark_last_read(index).map(Some),
            None => Ok(None),
        }
    }

    /// Toggle the bookmark on the cued verse; `None` when nothing is cued
    pub fn toggle_current_bookmark(&self) -> Result<Option<bool>> {
        match self.sequencer.current_index() {
            Some(index) => self.toggle_bookmark(index).map(Some),
            None => Ok(None),
        }
    }

    pub fn bookmarks(&self) -> Result<Vec<Bookmark>> {
        Ok(self.store.bookmarks()?)
    }

    pub fn last_read(&self) -> Result<Option<LastRead>> {
        Ok(self.store.last_read()?)
    }

    /// Reading progress percentage derived from the last-read marker
    pub fn progress(&mut self) -> Result<f64> {
        let (counts, total) = self.verse_counts();
        Ok(self.store.progress(&counts, total)?)
    }

    /// Compute progress and persist it
    pub fn record_progress(&mut self) -> Result<f64> {
        let (counts, total) = self.verse_counts();
        Ok(self.store.record_progress(&counts, total)?)
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub fn play(&mut self, index: i64) {
        self.sequencer.play(index);
    }

    pub fn toggle(&mut self) {
        self.sequencer.toggle();
    }

    pub fn next(&mut self) {
        self.sequencer.next();
    }

    pub fn previous(&mut self) {
        self.sequencer.previous();
    }

    pub fn stop(&mut self) {
        self.sequencer.stop();
    }

    pub fn set_repeat(&mut self, repeat_one: bool) {
        self.sequencer.set_repeat(repeat_one);
    }

    /// Apply queued engine signals
    pub fn pump(&mut self) -> usize {
        self.sequencer.pump()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.sequencer.status()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.sequencer.snapshot()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.sequencer.current_index()
    }

    pub fn changes(&self) -> ChangeIterator {
        self.sequencer.changes()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn verses(&self) -> &[Verse] {
        self.sequencer.verses()
    }

    pub fn open_chapter_info(&self) -> Option<&OpenChapter> {
        self.open.as_ref()
    }

    pub fn reciter(&self) -> &str {
        &self.reciter
    }

    /// Chapter listing; retried on each call until a fetch succeeds
    pub fn chapters(&mut self) -> &[ChapterRef] {
        if self.chapters.is_empty() {
            self.chapters = self.client.chapter_list();
        }
        &self.chapters
    }

    pub fn sequencer(&self) -> &AyahSequencer<E> {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut AyahSequencer<E> {
        &mut self.sequencer
    }

    pub fn store(&self) -> &ReadingStore<S> {
        &self.store
    }

    pub fn client(&self) -> &QuranClient {
        &self.client
    }

    fn locate(&self, verse_index: usize) -> Result<(VerseKey, String, String)> {
        let open = self.open.as_ref().ok_or(SdkError::NoChapterOpen)?;
        let verses = self.sequencer.verses();
        let verse = verses.get(verse_index).ok_or(SdkError::VerseOutOfRange {
            index: verse_index,
            len: verses.len(),
        })?;

        Ok((
            VerseKey::new(open.number, verse.number_in_chapter),
            open.name.clone(),
            verse.text.clone(),
        ))
    }

    fn verse_counts(&mut self) -> (Vec<u16>, u32) {
        let chapters = self.chapters();
        let counts = chapters.iter().map(|c| c.verse_count).collect();
        (counts, total_verses(chapters))
    }
}

// ============================================================================
// ReadingSessionBuilder
// ============================================================================

/// Builder for ReadingSession configuration
pub struct ReadingSessionBuilder<E: AudioEngine, S: KeyValueStore> {
    engine: E,
    store: S,
    client_config: ClientConfig,
    reciter: Option<String>,
}

impl<E: AudioEngine, S: KeyValueStore> ReadingSessionBuilder<E, S> {
    fn new(engine: E, store: S) -> Self {
        Self {
            engine,
            store,
            client_config: ClientConfig::default(),
            reciter: None,
        }
    }

    /// Set the HTTP client configuration
    pub fn client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = config;
        self
    }

    /// Use `reciter` instead of the stored preference
    pub fn reciter(mut self, reciter: impl Into<String>) -> Self {
        self.reciter = Some(reciter.into());
        self
    }

    /// Build the ReadingSession
    ///
    /// The reciter comes from the builder, then the store, then the default.
    /// A stored id that is no longer offered falls back to the default.
    pub fn build(self) -> Result<ReadingSession<E, S>> {
        let store = ReadingStore::new(self.store);

        let reciter = match self.reciter {
            Some(reciter) => {
                if find_reciter(&reciter).is_none() {
                    return Err(SdkError::UnknownReciter(reciter));
                }
                reciter
            }
            None => match store.reciter()? {
                Some(stored) if find_reciter(&stored).is_some() => stored,
                Some(stored) => {
                    warn!(reciter = %stored, "Stored reciter no longer available, using default");
                    DEFAULT_RECITER.to_string()
                }
                None => DEFAULT_RECITER.to_string(),
            },
        };

        info!(reciter = %reciter, "ReadingSession created");
        Ok(ReadingSession {
            client: QuranClient::with_config(self.client_config),
            store,
            sequencer: AyahSequencer::new(self.engine),
            reciter,
            chapters: Vec::new(),
            open: None,
        })
    }
}
