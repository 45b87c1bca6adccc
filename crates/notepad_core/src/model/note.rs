//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted by the store.
//! - Provide mutation helpers that keep timestamp/tag invariants local.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `updated_at` never moves backwards and stays >= `created_at`.
//! - `tags` holds no duplicates under case-sensitive equality.

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Partial title/content update applied to the active note.
///
/// Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NoteUpdate {
    /// Update that replaces only the title.
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            content: None,
        }
    }

    /// Update that replaces only the content.
    pub fn content(value: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(value.into()),
        }
    }
}

/// Invariant violation detected in persisted note state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    UpdatedBeforeCreated { id: NoteId },
    DuplicateTag { id: NoteId, tag: String },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpdatedBeforeCreated { id } => {
                write!(f, "note {id} has updated_at earlier than created_at")
            }
            Self::DuplicateTag { id, tag } => {
                write!(f, "note {id} carries duplicate tag `{tag}`")
            }
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical note record.
///
/// The serialized field names (`createdAt`, `updatedAt`) are the wire names
/// of the storage blob; the whole collection persists as one JSON array of
/// these records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable global ID, generated at creation.
    pub id: NoteId,
    /// Free-form title, may be empty.
    pub title: String,
    /// Markdown body, may be empty.
    pub content: String,
    /// Fixed at creation, immutable afterwards.
    pub created_at: Timestamp,
    /// Refreshed on every mutation to this note.
    pub updated_at: Timestamp,
    /// Unique values in insertion order.
    pub tags: Vec<String>,
}

impl Note {
    /// Creates an empty note with a generated stable ID.
    ///
    /// # Invariants
    /// - Title, content and tags start empty.
    /// - `created_at == updated_at == now`.
    pub fn new(now: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            content: String::new(),
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
        }
    }

    /// Bumps `updated_at`, clamping so it never moves backwards.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now.max(self.updated_at);
    }

    /// Applies a partial title/content update and bumps `updated_at`.
    pub fn apply(&mut self, update: NoteUpdate, now: Timestamp) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        self.touch(now);
    }

    /// Whether the exact tag (case-sensitive) is present.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    /// Appends a tag unless it is blank or already present.
    ///
    /// Returns whether the tag set changed. Does not bump `updated_at`;
    /// callers decide when a change counts as a mutation.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if tag.trim().is_empty() || self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes the exact-match tag. Returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        self.tags.len() != before
    }

    /// Checks record-level invariants on hydrated state.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.updated_at < self.created_at {
            return Err(NoteValidationError::UpdatedBeforeCreated { id: self.id });
        }

        for (index, tag) in self.tags.iter().enumerate() {
            if self.tags[..index].iter().any(|earlier| earlier == tag) {
                return Err(NoteValidationError::DuplicateTag {
                    id: self.id,
                    tag: tag.clone(),
                });
            }
        }

        Ok(())
    }
}
