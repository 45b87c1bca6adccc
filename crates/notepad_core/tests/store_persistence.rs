use notepad_core::{
    MemoryStorage, NoteStore, NoteUpdate, Storage, StorageError, StorageResult, NOTES_STORAGE_KEY,
};

struct FailingStorage;

impl Storage for FailingStorage {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Sqlite(rusqlite::Error::InvalidQuery))
    }
}

struct UnreadableStorage;

impl Storage for UnreadableStorage {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Sqlite(rusqlite::Error::InvalidQuery))
    }

    fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Ok(())
    }
}

#[test]
fn mutations_survive_reopening_from_the_same_storage() {
    let mut storage = MemoryStorage::new();

    let (first_id, second_id) = {
        let mut store = NoteStore::open(&mut storage);
        let welcome_id = store.notes()[0].id;
        store.delete_note(welcome_id);

        let first = store.create_note();
        store.update_active(NoteUpdate::title("First"));
        store.update_active(NoteUpdate::content("alpha body"));
        store.add_tag(first.id, "work");
        store.add_tag(first.id, "home");

        let second = store.create_note();
        store.update_active(NoteUpdate::title("Second"));
        (first.id, second.id)
    };

    let reopened = NoteStore::open(&mut storage);

    assert_eq!(reopened.notes().len(), 2);
    let second = &reopened.notes()[0];
    let first = &reopened.notes()[1];
    assert_eq!(second.id, second_id);
    assert_eq!(second.title, "Second");
    assert_eq!(first.id, first_id);
    assert_eq!(first.title, "First");
    assert_eq!(first.content, "alpha body");
    assert_eq!(first.tags, vec!["work".to_string(), "home".to_string()]);
}

#[test]
fn reopening_preserves_timestamps_exactly() {
    let mut storage = MemoryStorage::new();

    let created = {
        let mut store = NoteStore::open(&mut storage);
        store.create_note();
        store.update_active(NoteUpdate::content("body"));
        store.active_note().unwrap().clone()
    };

    let reopened = NoteStore::open(&mut storage);
    let revived = reopened
        .notes()
        .iter()
        .find(|note| note.id == created.id)
        .unwrap();

    assert_eq!(revived.created_at, created.created_at);
    assert_eq!(revived.updated_at, created.updated_at);
}

#[test]
fn serialized_blob_uses_wire_field_names() {
    let mut storage = MemoryStorage::new();
    {
        let mut store = NoteStore::open(&mut storage);
        store.create_note();
    }

    let blob = storage.get(NOTES_STORAGE_KEY).unwrap().unwrap();
    assert!(blob.starts_with('['));
    assert!(blob.contains("\"createdAt\""));
    assert!(blob.contains("\"updatedAt\""));
    assert!(!blob.contains("\"created_at\""));
}

#[test]
fn hydration_activates_the_most_recently_updated_note() {
    let blob = r#"[
      {"id":"00000000-0000-4000-8000-000000000001","title":"a","content":"","createdAt":1000,"updatedAt":1000,"tags":[]},
      {"id":"00000000-0000-4000-8000-000000000002","title":"b","content":"","createdAt":1000,"updatedAt":9000,"tags":[]},
      {"id":"00000000-0000-4000-8000-000000000003","title":"c","content":"","createdAt":1000,"updatedAt":5000,"tags":[]}
    ]"#;
    let mut storage = MemoryStorage::new();
    storage.set(NOTES_STORAGE_KEY, blob).unwrap();

    let store = NoteStore::open(storage);

    assert_eq!(store.active_note().unwrap().title, "b");
}

#[test]
fn hydration_breaks_update_ties_in_favor_of_the_earlier_entry() {
    let blob = r#"[
      {"id":"00000000-0000-4000-8000-000000000001","title":"a","content":"","createdAt":1000,"updatedAt":7000,"tags":[]},
      {"id":"00000000-0000-4000-8000-000000000002","title":"b","content":"","createdAt":1000,"updatedAt":7000,"tags":[]}
    ]"#;
    let mut storage = MemoryStorage::new();
    storage.set(NOTES_STORAGE_KEY, blob).unwrap();

    let store = NoteStore::open(storage);

    assert_eq!(store.active_note().unwrap().title, "a");
}

#[test]
fn corrupt_blob_degrades_to_an_empty_collection() {
    let mut storage = MemoryStorage::new();
    storage.set(NOTES_STORAGE_KEY, "not json at all").unwrap();

    let store = NoteStore::open(storage);

    assert!(store.notes().is_empty());
    assert!(store.active_note().is_none());
}

#[test]
fn blob_violating_note_invariants_is_discarded() {
    // updated_at earlier than created_at
    let backwards = r#"[{"id":"00000000-0000-4000-8000-000000000001","title":"a","content":"","createdAt":2000,"updatedAt":1000,"tags":[]}]"#;
    let mut storage = MemoryStorage::new();
    storage.set(NOTES_STORAGE_KEY, backwards).unwrap();
    assert!(NoteStore::open(storage).notes().is_empty());

    // duplicate tag on one note
    let duplicate_tags = r#"[{"id":"00000000-0000-4000-8000-000000000001","title":"a","content":"","createdAt":1000,"updatedAt":1000,"tags":["x","x"]}]"#;
    let mut storage = MemoryStorage::new();
    storage.set(NOTES_STORAGE_KEY, duplicate_tags).unwrap();
    assert!(NoteStore::open(storage).notes().is_empty());

    // duplicate id across notes
    let duplicate_ids = r#"[
      {"id":"00000000-0000-4000-8000-000000000001","title":"a","content":"","createdAt":1000,"updatedAt":1000,"tags":[]},
      {"id":"00000000-0000-4000-8000-000000000001","title":"b","content":"","createdAt":1000,"updatedAt":1000,"tags":[]}
    ]"#;
    let mut storage = MemoryStorage::new();
    storage.set(NOTES_STORAGE_KEY, duplicate_ids).unwrap();
    assert!(NoteStore::open(storage).notes().is_empty());
}

#[test]
fn empty_stored_collection_is_not_reseeded() {
    let mut storage = MemoryStorage::new();
    storage.set(NOTES_STORAGE_KEY, "[]").unwrap();

    let store = NoteStore::open(storage);

    assert!(store.notes().is_empty());
    assert!(store.active_note().is_none());
}

#[test]
fn write_failures_are_swallowed_and_the_store_keeps_working() {
    let mut store = NoteStore::open(FailingStorage);

    // Seeding already hit the failing write; the collection is intact.
    assert_eq!(store.notes().len(), 1);

    let created = store.create_note();
    store.update_active(NoteUpdate::title("still here"));
    store.add_tag(created.id, "work");

    let active = store.active_note().unwrap();
    assert_eq!(active.title, "still here");
    assert_eq!(active.tags, vec!["work".to_string()]);
}

#[test]
fn storage_read_errors_degrade_to_an_empty_collection() {
    let store = NoteStore::open(UnreadableStorage);

    assert!(store.notes().is_empty());
    assert!(store.active_note().is_none());
}
