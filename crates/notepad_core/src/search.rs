//! Substring search and tag filtering over the note collection.
//!
//! # Responsibility
//! - Match notes against user queries without touching store state.
//! - Shape the sidebar's tag cloud (unique, sorted).
//!
//! # Invariants
//! - A blank or whitespace-only query matches every note.
//! - Matching is case-insensitive on title, content and tags.
//! - Tag filtering is exact-match and case-sensitive, like the tag set
//!   itself.

use crate::model::note::Note;

/// Filters the collection by query, preserving collection order.
///
/// Returns borrowed entries; the collection itself is never touched.
pub fn search_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return notes.iter().collect();
    }

    notes
        .iter()
        .filter(|note| matches_needle(note, &needle))
        .collect()
}

/// Notes carrying the exact tag, preserving collection order.
pub fn filter_by_tag<'a>(notes: &'a [Note], tag: &str) -> Vec<&'a Note> {
    notes.iter().filter(|note| note.has_tag(tag)).collect()
}

/// Unique tags across the collection, sorted for stable display.
pub fn collect_tags(notes: &[Note]) -> Vec<String> {
    let mut tags: Vec<String> = notes
        .iter()
        .flat_map(|note| note.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

fn matches_needle(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
        || note
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
