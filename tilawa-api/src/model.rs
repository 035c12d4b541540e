//! Chapter and verse records
//!
//! Public types are immutable once built. The `Wire*` types mirror the JSON
//! returned by AlQuran Cloud and are converted at the client boundary.

use serde::{Deserialize, Serialize};

/// Number of chapters in the mushaf
pub const CHAPTER_COUNT: u16 = 114;

/// Verse total used when the chapter list is unavailable
pub const DEFAULT_TOTAL_VERSES: u32 = 6236;

/// Where a chapter was revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Revelation {
    Meccan,
    Medinan,
}

impl Revelation {
    /// Parse the API's `revelationType` field
    ///
    /// Anything other than "Medinan" (case-insensitive) is treated as Meccan,
    /// which covers 86 of the 114 chapters.
    pub fn from_api(value: &str) -> Self {
        if value.eq_ignore_ascii_case("medinan") {
            Revelation::Medinan
        } else {
            Revelation::Meccan
        }
    }
}

/// Listing entry for a chapter (surah)
///
/// Only used for navigation and progress. Playback works on [`Verse`] lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterRef {
    pub number: u16,
    /// Arabic display name
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub verse_count: u16,
    pub revelation: Revelation,
}

/// One verse (ayah) with its recitation audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    /// Absolute verse number across the whole text
    pub number: u32,
    /// 1-based position inside its chapter
    pub number_in_chapter: u16,
    pub text: String,
    /// Primary audio URL, always https when present
    pub audio: Option<String>,
    pub audio_secondary: Vec<String>,
    pub juz: u16,
    pub page: u16,
}

impl Verse {
    /// Whether a recitation is available for this verse
    pub fn has_audio(&self) -> bool {
        self.audio.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Sum of verse counts, falling back to [`DEFAULT_TOTAL_VERSES`] for an empty list
pub fn total_verses(chapters: &[ChapterRef]) -> u32 {
    let total: u32 = chapters.iter().map(|c| u32::from(c.verse_count)).sum();
    if total == 0 {
        DEFAULT_TOTAL_VERSES
    } else {
        total
    }
}

/// Filter chapters by a search term
///
/// Matches a substring of the Arabic name, or a case-insensitive substring of
/// the English transliteration. An empty term matches everything.
pub fn filter_chapters<'a>(chapters: &'a [ChapterRef], term: &str) -> Vec<&'a ChapterRef> {
    let lowered = term.to_lowercase();
    chapters
        .iter()
        .filter(|c| c.name.contains(term) || c.english_name.to_lowercase().contains(&lowered))
        .collect()
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub code: u16,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireChapter {
    pub number: u16,
    pub name: String,
    pub english_name: String,
    #[serde(default)]
    pub english_name_translation: String,
    pub number_of_ayahs: u16,
    #[serde(default)]
    pub revelation_type: String,
}

impl From<WireChapter> for ChapterRef {
    fn from(wire: WireChapter) -> Self {
        ChapterRef {
            number: wire.number,
            name: wire.name,
            english_name: wire.english_name,
            english_name_translation: wire.english_name_translation,
            verse_count: wire.number_of_ayahs,
            revelation: Revelation::from_api(&wire.revelation_type),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireEdition {
    #[serde(default)]
    pub ayahs: Vec<WireAyah>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireAyah {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub number_in_surah: u16,
    #[serde(default)]
    pub juz: u16,
    #[serde(default)]
    pub page: u16,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub audio_secondary: Option<Vec<String>>,
}
