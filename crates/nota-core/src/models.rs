//! Core data models for nota.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note with its metadata.
///
/// Timestamps serialize as RFC 3339; list endpoints re-format them for
/// display at the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier, stable for the lifetime of the note.
    pub id: i64,
    /// Note title. May be empty.
    pub title: String,
    /// Note body text. May be empty.
    pub content: String,
    /// Free-text grouping label. Defaults to "General" on create.
    pub category: String,
    /// 7-character hex display color, e.g. "#3498db".
    pub color: String,
    /// Set once at creation, never changes.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update. Always >= `created_at`.
    pub updated_at: DateTime<Utc>,
    /// Pinned notes sort ahead of unpinned notes in listings.
    pub is_pinned: bool,
    /// Ordered labels, persisted comma-joined in a single column.
    pub tags: Vec<String>,
}

/// Aggregate counters over the whole note table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteStats {
    /// Count of all notes.
    pub total_notes: i64,
    /// Note count per category, keyed by category name.
    pub categories: BTreeMap<String, i64>,
    /// Count of notes with `is_pinned` set.
    pub pinned_notes: i64,
}
