//! End-to-end reading session tests
//!
//! A mockito server plays AlQuran Cloud, `MockEngine` plays the audio output
//! and `MemoryStore` plays device storage.

use mockito::{Mock, Server, ServerGuard};
use rstest::rstest;
use tilawa_player::mock::{EngineCall, MockEngine};
use tilawa_sdk::{
    ClientConfig, MemoryStore, PlaybackChange, PlaybackStatus, ReadingSession, SdkError,
};
use tilawa_store::ReadingStore;

const FATIHA_NAME: &str = "سُورَةُ ٱلْفَاتِحَةِ";

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e))
}

struct Harness {
    server: ServerGuard,
    engine: MockEngine,
    store: MemoryStore,
    _mocks: Vec<Mock>,
}

impl Harness {
    fn new() -> Self {
        let mut server = Server::new();
        let mocks = vec![
            server
                .mock("GET", "/surah")
                .with_status(200)
                .with_body(fixture("chapters.json"))
                .create(),
            server
                .mock("GET", "/surah/1/editions/quran-uthmani,ar.alafasy")
                .with_status(200)
                .with_body(fixture("fatiha_alafasy.json"))
                .create(),
            server
                .mock("GET", "/surah/1/editions/quran-uthmani,ar.husary")
                .with_status(200)
                .with_body(fixture("fatiha_husary.json"))
                .create(),
        ];

        Self {
            server,
            engine: MockEngine::auto_confirming(),
            store: MemoryStore::new(),
            _mocks: mocks,
        }
    }

    fn session(&self) -> ReadingSession<MockEngine, MemoryStore> {
        ReadingSession::builder(self.engine.clone(), self.store.clone())
            .client_config(ClientConfig::default().with_base_url(self.server.url()))
            .build()
            .expect("session")
    }

    fn complete_current(&self, session: &mut ReadingSession<MockEngine, MemoryStore>) {
        let id = self.engine.last_loaded().expect("a loaded resource");
        self.engine.complete(id);
        session.pump();
    }
}

#[test]
fn test_open_chapter_loads_verses_idle() {
    let harness = Harness::new();
    let mut session = harness.session();

    assert_eq!(session.open_chapter(1).unwrap(), 7);

    assert_eq!(session.status(), PlaybackStatus::Idle);
    assert_eq!(session.verses()[0].number_in_chapter, 1);
    let open = session.open_chapter_info().unwrap();
    assert_eq!(open.number, 1);
    assert_eq!(open.name, FATIHA_NAME);
}

#[test]
fn test_recites_whole_chapter_then_stops() {
    let harness = Harness::new();
    let mut session = harness.session();
    session.open_chapter(1).unwrap();

    session.toggle();
    session.pump();
    assert_eq!(session.current_index(), Some(0));

    for expected in 1..7 {
        harness.complete_current(&mut session);
        assert_eq!(session.current_index(), Some(expected));
        assert_eq!(session.status(), PlaybackStatus::CuedPlaying);
    }

    harness.complete_current(&mut session);
    assert_eq!(session.status(), PlaybackStatus::Idle);
    assert_eq!(harness.engine.live_resources(), 0);
    assert_eq!(harness.engine.max_live(), 1);
    assert_eq!(harness.engine.load_count(), 7);
}

#[test]
fn test_highlight_follows_index_changes() {
    let harness = Harness::new();
    let mut session = harness.session();
    session.open_chapter(1).unwrap();
    let changes = session.changes();
    let _ = changes.try_iter().count();

    session.play(5);
    session.pump();
    harness.complete_current(&mut session);
    harness.complete_current(&mut session);

    let highlighted: Vec<_> = changes
        .try_iter()
        .filter_map(|change| match change {
            PlaybackChange::IndexChanged(index) => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(highlighted, vec![Some(5), Some(6), None]);
}

#[test]
fn test_bookmark_keyed_by_verse_number() {
    let harness = Harness::new();
    let mut session = harness.session();
    session.open_chapter(1).unwrap();

    assert!(session.toggle_bookmark(2).unwrap());
    assert!(session.is_bookmarked(2).unwrap());

    let bookmarks = session.bookmarks().unwrap();
    assert_eq!(bookmarks.len(), 1);
    assert_eq!(bookmarks[0].id, "1:3");
    assert_eq!(bookmarks[0].chapter_name, FATIHA_NAME);
    assert_eq!(bookmarks[0].text, session.verses()[2].text);

    assert!(!session.toggle_bookmark(2).unwrap());
    assert!(session.bookmarks().unwrap().is_empty());
}

#[test]
fn test_verse_index_out_of_range() {
    let harness = Harness::new();
    let mut session = harness.session();
    session.open_chapter(1).unwrap();

    assert!(matches!(
        session.mark_last_read(7),
        Err(SdkError::VerseOutOfRange { index: 7, len: 7 })
    ));
}

#[test]
fn test_mark_current_last_read_and_progress() {
    let harness = Harness::new();
    let mut session = harness.session();
    session.open_chapter(1).unwrap();

    session.play(4);
    session.pump();
    let marker = session.mark_current_last_read().unwrap().expect("a cued verse");

    assert_eq!(marker.chapter, 1);
    assert_eq!(marker.verse, 5);
    // Playback is unaffected by persistence
    assert_eq!(session.status(), PlaybackStatus::CuedPlaying);

    // 5 of the 493 verses in the three-chapter listing
    let progress = session.record_progress().unwrap();
    assert!((progress - 5.0 / 493.0 * 100.0).abs() < 1e-9);
    assert_eq!(
        ReadingStore::new(harness.store.clone()).recorded_progress().unwrap(),
        Some(progress)
    );
}

#[test]
fn test_resume_last_read_in_new_session() {
    let harness = Harness::new();
    {
        let mut session = harness.session();
        session.open_chapter(1).unwrap();
        session.mark_last_read(3).unwrap();
    }

    let mut session = harness.session();
    assert_eq!(session.resume_last_read().unwrap(), Some(3));
    assert_eq!(session.open_chapter_info().unwrap().number, 1);
    assert_eq!(session.status(), PlaybackStatus::Idle);
}

#[test]
fn test_resume_without_marker() {
    let harness = Harness::new();
    let mut session = harness.session();
    assert_eq!(session.resume_last_read().unwrap(), None);
    assert!(session.open_chapter_info().is_none());
}

#[test]
fn test_change_reciter_reloads_open_chapter() {
    let harness = Harness::new();
    let mut session = harness.session();
    session.open_chapter(1).unwrap();
    session.play(1);
    session.pump();

    session.change_reciter("ar.husary").unwrap();

    assert_eq!(session.reciter(), "ar.husary");
    assert_eq!(session.status(), PlaybackStatus::Idle);
    assert_eq!(harness.engine.live_resources(), 0);
    assert!(session.verses()[0]
        .audio
        .as_deref()
        .unwrap()
        .contains("/ar.husary/"));

    // The preference outlives the session
    drop(session);
    assert_eq!(harness.session().reciter(), "ar.husary");
}

#[test]
fn test_close_chapter_releases_audio() {
    let harness = Harness::new();
    let mut session = harness.session();
    session.open_chapter(1).unwrap();
    session.play(0);
    session.pump();

    session.close_chapter();

    assert!(session.verses().is_empty());
    assert!(session.open_chapter_info().is_none());
    assert!(matches!(harness.engine.calls().last(), Some(EngineCall::Release(_))));
}

#[rstest]
#[case(500)]
#[case(404)]
fn test_provider_failure_opens_empty_chapter(#[case] status: usize) {
    let mut server = Server::new();
    let _chapters = server
        .mock("GET", "/surah")
        .with_status(status)
        .create();
    let _verses = server
        .mock("GET", "/surah/2/editions/quran-uthmani,ar.alafasy")
        .with_status(status)
        .create();

    let engine = MockEngine::auto_confirming();
    let mut session = ReadingSession::builder(engine.clone(), MemoryStore::new())
        .client_config(ClientConfig::default().with_base_url(server.url()))
        .build()
        .unwrap();

    assert_eq!(session.open_chapter(2).unwrap(), 0);
    assert_eq!(session.open_chapter_info().unwrap().name, "");

    session.play(0);
    session.pump();
    assert_eq!(session.status(), PlaybackStatus::Idle);
    assert!(engine.calls().is_empty());
}
