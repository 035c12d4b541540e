//! Reading records persisted through the file backend survive a restart

use tilawa_store::{FileStore, ReadingStore, StoreError, VerseKey, BOOKMARKS_KEY};

#[test]
fn test_records_survive_reopen() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let dir = temp.path().join("tilawa");

    {
        let store = ReadingStore::new(FileStore::open(&dir).unwrap());
        store.toggle_bookmark(VerseKey::new(1, 5), "الفاتحة", "إِيَّاكَ نَعْبُدُ").unwrap();
        store.mark_last_read(VerseKey::new(1, 6), "الفاتحة").unwrap();
        store.set_reciter("ar.husary").unwrap();
    }

    let store = ReadingStore::new(FileStore::open(&dir).unwrap());
    assert!(store.is_bookmarked(VerseKey::new(1, 5)).unwrap());
    assert_eq!(store.last_read().unwrap().unwrap().key(), VerseKey::new(1, 6));
    assert_eq!(store.reciter().unwrap().as_deref(), Some("ar.husary"));
}

#[test]
fn test_corrupt_file_is_reported() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let dir = temp.path().join("tilawa");

    let backend = FileStore::open(&dir).unwrap();
    std::fs::write(dir.join(format!("{}.json", BOOKMARKS_KEY)), "[{").unwrap();

    let store = ReadingStore::new(backend);
    match store.bookmarks() {
        Err(StoreError::Corrupt { key, .. }) => assert_eq!(key, BOOKMARKS_KEY),
        other => panic!("expected corrupt record, got {:?}", other),
    }
}
