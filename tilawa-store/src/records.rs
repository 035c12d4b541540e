//! Persisted reading records

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Position of a verse: chapter number and 1-based verse number within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VerseKey {
    pub chapter: u16,
    pub verse: u16,
}

impl VerseKey {
    pub fn new(chapter: u16, verse: u16) -> Self {
        Self { chapter, verse }
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

impl FromStr for VerseKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chapter, verse) = s
            .split_once(':')
            .ok_or_else(|| format!("missing ':' in verse key '{}'", s))?;
        let chapter = chapter
            .parse()
            .map_err(|_| format!("bad chapter in verse key '{}'", s))?;
        let verse = verse
            .parse()
            .map_err(|_| format!("bad verse in verse key '{}'", s))?;
        Ok(Self { chapter, verse })
    }
}

/// A bookmarked verse
///
/// Stored as a list under `quran_bookmarks`; at most one entry per `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// `"chapter:verse"`
    pub id: String,
    #[serde(rename = "surahNumber")]
    pub chapter: u16,
    #[serde(rename = "surahName")]
    pub chapter_name: String,
    #[serde(rename = "ayahNumber")]
    pub verse: u16,
    pub text: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl Bookmark {
    pub fn key(&self) -> VerseKey {
        VerseKey::new(self.chapter, self.verse)
    }
}

/// Most recent reading position, overwritten on every update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRead {
    #[serde(rename = "surahNumber")]
    pub chapter: u16,
    #[serde(rename = "surahName")]
    pub chapter_name: String,
    #[serde(rename = "ayahNumber")]
    pub verse: u16,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl LastRead {
    pub fn key(&self) -> VerseKey {
        VerseKey::new(self.chapter, self.verse)
    }
}

/// Percentage of the text read up to `last_read`
///
/// `verse_counts[i]` is the verse count of chapter `i + 1`. Returns 0 for an
/// empty listing or a zero total and never exceeds 100.
pub fn reading_progress(last_read: &LastRead, verse_counts: &[u16], total: u32) -> f64 {
    if verse_counts.is_empty() || total == 0 {
        return 0.0;
    }

    let preceding = usize::from(last_read.chapter.saturating_sub(1));
    let read: u32 = verse_counts
        .iter()
        .take(preceding)
        .map(|&count| u32::from(count))
        .sum::<u32>()
        + u32::from(last_read.verse);

    (f64::from(read) / f64::from(total) * 100.0).min(100.0)
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
