//! Core domain logic for Notepad.
//! This crate is the single source of truth for note state and persistence.

pub mod indicator;
pub mod logging;
pub mod model;
pub mod preview;
pub mod search;
pub mod storage;
pub mod store;
pub mod time;

pub use indicator::{SaveIndicator, SavePhase};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NoteUpdate, NoteValidationError};
pub use preview::preview_line;
pub use search::{collect_tags, filter_by_tag, search_notes};
pub use storage::{MemoryStorage, SqliteStorage, Storage, StorageError, StorageResult};
pub use store::note_store::{NoteStore, NOTES_STORAGE_KEY};
pub use time::{format_distance_to_now, Timestamp};
