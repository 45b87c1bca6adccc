//! Note store: single source of truth for notes and the active selection.
//!
//! # Responsibility
//! - Own the note collection and mediate every mutation.
//! - Hydrate from durable storage once and write back after each change.
//!
//! # Invariants
//! - Note ids stay unique across the collection.
//! - The active selection is held as an id and the active note is derived by
//!   lookup on read, so a deleted or stale id never surfaces as a dangling
//!   reference.
//! - Every mutation leaves storage holding the full serialized collection.

use crate::model::note::{Note, NoteId, NoteUpdate};
use crate::search;
use crate::storage::Storage;
use crate::time::Timestamp;
use log::{error, info, warn};

/// Fixed storage key holding the serialized collection.
pub const NOTES_STORAGE_KEY: &str = "notes";

const WELCOME_TITLE: &str = "Welcome to Notepad";
const WELCOME_TAG: &str = "welcome";
const WELCOME_CONTENT: &str = "# Welcome to your new Notepad!\n\nStart writing your notes here. You can use Markdown formatting for:\n\n- **Bold text**\n- *Italic text*\n- ## Headers\n- [Links](https://example.com)\n- And more!\n\nUse the sidebar to create new notes or switch between existing ones.";

/// Authoritative store for all notes and the active selection.
///
/// All operations run synchronously on the caller's thread and persist the
/// whole collection before returning. Callers treat returned notes as
/// read-only snapshots and re-read after each operation instead of mutating
/// in place.
pub struct NoteStore<S: Storage> {
    storage: S,
    notes: Vec<Note>,
    active_id: Option<NoteId>,
}

impl<S: Storage> NoteStore<S> {
    /// Opens the store, hydrating from storage or seeding the welcome note.
    ///
    /// Never fails: an unreadable or invalid persisted blob degrades to an
    /// empty collection after logging.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            notes: Vec::new(),
            active_id: None,
        };
        store.hydrate();
        store
    }

    /// Read-only view of the collection, newest-created first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The note currently selected for editing, derived by id lookup.
    pub fn active_note(&self) -> Option<&Note> {
        let active_id = self.active_id?;
        self.notes.iter().find(|note| note.id == active_id)
    }

    /// Directly selects a note (or clears the selection).
    ///
    /// The id is not validated here; an id outside the collection derives to
    /// no active note on read.
    pub fn set_active(&mut self, id: Option<NoteId>) {
        self.active_id = id;
    }

    /// Creates an empty note, prepends it to the collection and makes it
    /// active. Returns a snapshot of the new note.
    pub fn create_note(&mut self) -> Note {
        let note = Note::new(Timestamp::now());
        self.active_id = Some(note.id);
        self.notes.insert(0, note.clone());
        self.persist();
        note
    }

    /// Applies a partial title/content update to the active note and bumps
    /// its `updated_at`. Silent no-op when nothing is active.
    pub fn update_active(&mut self, update: NoteUpdate) {
        let Some(active_id) = self.active_id else {
            return;
        };
        let Some(note) = self.notes.iter_mut().find(|note| note.id == active_id) else {
            return;
        };

        note.apply(update, Timestamp::now());
        self.persist();
    }

    /// Removes the note with the given id. No-op for unknown ids.
    ///
    /// When the active note is removed, the first remaining note in
    /// collection order becomes active, or none if the collection is empty.
    pub fn delete_note(&mut self, id: NoteId) {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            return;
        }

        if self.active_id == Some(id) {
            self.active_id = self.notes.first().map(|note| note.id);
        }
        self.persist();
    }

    /// Case-insensitive substring search over title, content and tags.
    ///
    /// A blank query returns the whole collection. Never mutates.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        search::search_notes(&self.notes, query)
    }

    /// Appends a tag to the note with the given id.
    ///
    /// Blank tags, duplicate tags (case-sensitive) and unknown ids are
    /// silent no-ops; an actual change bumps `updated_at`.
    pub fn add_tag(&mut self, id: NoteId, tag: &str) {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return;
        };

        if note.add_tag(tag) {
            note.touch(Timestamp::now());
            self.persist();
        }
    }

    /// Removes the exact-match tag from the note with the given id.
    ///
    /// The `updated_at` bump is unconditional: removing an absent tag still
    /// counts as a mutation. Unknown ids are silent no-ops.
    pub fn remove_tag(&mut self, id: NoteId, tag: &str) {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return;
        };

        note.remove_tag(tag);
        note.touch(Timestamp::now());
        self.persist();
    }

    fn hydrate(&mut self) {
        let blob = match self.storage.get(NOTES_STORAGE_KEY) {
            Ok(blob) => blob,
            Err(err) => {
                error!("event=store_hydrate module=store status=error error={err}");
                return;
            }
        };

        let Some(blob) = blob else {
            self.seed_welcome_note();
            return;
        };

        match decode_notes(&blob) {
            Ok(notes) => {
                self.active_id = most_recently_updated(&notes);
                self.notes = notes;
                info!(
                    "event=store_hydrate module=store status=ok count={}",
                    self.notes.len()
                );
            }
            Err(message) => {
                warn!("event=store_hydrate module=store status=discarded error={message}");
            }
        }
    }

    fn seed_welcome_note(&mut self) {
        let mut note = Note::new(Timestamp::now());
        note.title = WELCOME_TITLE.to_string();
        note.content = WELCOME_CONTENT.to_string();
        note.tags.push(WELCOME_TAG.to_string());

        self.active_id = Some(note.id);
        self.notes.push(note);
        self.persist();
        info!("event=store_seed module=store status=ok");
    }

    /// Serializes the whole collection and writes it under the fixed key.
    ///
    /// Fire and forget: failures are logged and dropped, never surfaced to
    /// the caller.
    fn persist(&mut self) {
        let blob = match serde_json::to_string(&self.notes) {
            Ok(blob) => blob,
            Err(err) => {
                error!("event=store_persist module=store status=error stage=encode error={err}");
                return;
            }
        };

        if let Err(err) = self.storage.set(NOTES_STORAGE_KEY, &blob) {
            error!("event=store_persist module=store status=error stage=write error={err}");
        }
    }
}

fn decode_notes(blob: &str) -> Result<Vec<Note>, String> {
    let notes: Vec<Note> =
        serde_json::from_str(blob).map_err(|err| format!("parse failure: {err}"))?;

    for note in &notes {
        note.validate().map_err(|err| err.to_string())?;
    }

    for (index, note) in notes.iter().enumerate() {
        if notes[..index].iter().any(|earlier| earlier.id == note.id) {
            return Err(format!("duplicate note id {}", note.id));
        }
    }

    Ok(notes)
}

fn most_recently_updated(notes: &[Note]) -> Option<NoteId> {
    let mut best: Option<&Note> = None;
    for note in notes {
        // Strict comparison keeps the earliest entry on ties.
        if best.map_or(true, |current| note.updated_at > current.updated_at) {
            best = Some(note);
        }
    }
    best.map(|note| note.id)
}
