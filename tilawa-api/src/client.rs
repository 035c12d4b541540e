//! Blocking HTTP client for AlQuran Cloud

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, Result};
use crate::model::{ChapterRef, Envelope, Verse, WireAyah, WireChapter, WireEdition, CHAPTER_COUNT};

/// Public AlQuran Cloud endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.alquran.cloud/v1";

/// Text edition fetched alongside the audio edition
pub const DEFAULT_TEXT_EDITION: &str = "quran-uthmani";

/// Connection settings for [`QuranClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub text_edition: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(10),
            text_edition: DEFAULT_TEXT_EDITION.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_text_edition(mut self, edition: impl Into<String>) -> Self {
        self.text_edition = edition.into();
        self
    }
}

/// Client for the chapter listing and per-chapter verse endpoints
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct QuranClient {
    agent: ureq::Agent,
    config: ClientConfig,
}

impl Default for QuranClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QuranClient {
    /// Create a client against the public endpoint
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout_read(config.read_timeout)
            .build();
        Self { agent, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the full chapter listing (`GET /surah`)
    pub fn chapters(&self) -> Result<Vec<ChapterRef>> {
        let wire: Vec<WireChapter> = self.get_data("surah")?;
        Ok(wire.into_iter().map(ChapterRef::from).collect())
    }

    /// Fetch a chapter's verses with text and recitation audio
    ///
    /// Requests the text edition and the reciter's audio edition in one call
    /// and pairs them by position. Plain-http audio URLs are upgraded to https.
    pub fn verses(&self, chapter: u16, reciter: &str) -> Result<Vec<Verse>> {
        if chapter == 0 || chapter > CHAPTER_COUNT {
            return Err(ApiError::InvalidChapter(chapter));
        }

        let path = format!(
            "surah/{}/editions/{},{}",
            chapter, self.config.text_edition, reciter
        );
        let mut editions: Vec<WireEdition> = self.get_data(&path)?;
        if editions.len() < 2 {
            return Err(ApiError::MissingEdition(if editions.is_empty() {
                "text"
            } else {
                "audio"
            }));
        }

        let audio = editions.swap_remove(1);
        let text = editions.swap_remove(0);
        let verses = merge_editions(text.ayahs, audio.ayahs);

        debug!(chapter, reciter, count = verses.len(), "Fetched chapter verses");
        Ok(verses)
    }

    /// Chapter listing, or an empty list on any failure
    pub fn chapter_list(&self) -> Vec<ChapterRef> {
        self.chapters().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to fetch chapter list");
            Vec::new()
        })
    }

    /// Verse list, or an empty list on any failure
    pub fn verse_list(&self, chapter: u16, reciter: &str) -> Vec<Verse> {
        self.verses(chapter, reciter).unwrap_or_else(|e| {
            warn!(chapter, reciter, error = %e, "Failed to fetch chapter verses");
            Vec::new()
        })
    }

    /// GET `path`, unwrap the `{code, status, data}` envelope and decode `data`
    fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);

        let body = match self.agent.get(&url).call() {
            Ok(response) => response
                .into_string()
                .map_err(|e| ApiError::Network(e.to_string()))?,
            Err(ureq::Error::Status(code, response)) => {
                let message = response
                    .into_string()
                    .ok()
                    .and_then(|body| serde_json::from_str::<Envelope>(&body).ok())
                    .map(|envelope| envelope.status)
                    .unwrap_or_default();
                return Err(ApiError::Status { code, message });
            }
            Err(e) => return Err(ApiError::Network(e.to_string())),
        };

        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
        if envelope.code != 200 {
            return Err(ApiError::Status {
                code: envelope.code,
                message: envelope.status,
            });
        }

        serde_json::from_value(envelope.data).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Pair text ayahs with audio ayahs by index
fn merge_editions(text: Vec<WireAyah>, audio: Vec<WireAyah>) -> Vec<Verse> {
    let mut audio = audio.into_iter();
    text.into_iter()
        .map(|ayah| {
            let recitation = audio.next().unwrap_or_default();
            Verse {
                number: ayah.number,
                number_in_chapter: ayah.number_in_surah,
                text: ayah.text,
                audio: recitation
                    .audio
                    .filter(|url| !url.is_empty())
                    .map(|url| upgrade_to_https(&url)),
                audio_secondary: recitation
                    .audio_secondary
                    .unwrap_or_default()
                    .iter()
                    .map(|url| upgrade_to_https(url))
                    .collect(),
                juz: ayah.juz,
                page: ayah.page,
            }
        })
        .collect()
}

/// Rewrite an `http:` URL to `https:`; anything else is returned as-is
pub(crate) fn upgrade_to_https(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) if url.scheme() == "http" => match url.set_scheme("https") {
            Ok(()) => url.to_string(),
            Err(()) => raw.to_string(),
        },
        _ => raw.to_string(),
    }
}
