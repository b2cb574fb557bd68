//! Repository trait and operation request types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Note, NoteStats};

/// Fields for creating a new note.
///
/// Optional fields fall back to the defaults in [`crate::defaults`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub color: Option<String>,
    pub is_pinned: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Partial update: only `Some` fields overwrite stored values.
///
/// Absence is represented explicitly, so a client can set a field to an
/// empty value without it being mistaken for "not provided".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub is_pinned: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Listing filters. Absent fields mean "no restriction".
#[derive(Debug, Clone, Default)]
pub struct ListNotesRequest {
    /// Exact category match. `None`, the empty string, and the
    /// [`crate::defaults::CATEGORY_FILTER_ALL`] sentinel disable the filter.
    pub category: Option<String>,
    /// Substring match over title, content, and tags. Case folding is
    /// ASCII-only; non-ASCII text matches verbatim.
    pub search: Option<String>,
}

/// Persistence contract for notes.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note and return it as persisted.
    async fn create(&self, req: CreateNoteRequest) -> Result<Note>;

    /// List notes matching the filters, pinned first, then most
    /// recently updated first.
    async fn list(&self, req: ListNotesRequest) -> Result<Vec<Note>>;

    /// Fetch a single note by id.
    async fn fetch(&self, id: i64) -> Result<Note>;

    /// Check whether a note with the given id exists.
    async fn exists(&self, id: i64) -> Result<bool>;

    /// Apply the provided fields to an existing note and refresh its
    /// `updated_at`. Returns the updated note.
    async fn update(&self, id: i64, req: UpdateNoteRequest) -> Result<Note>;

    /// Permanently remove a note.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Distinct non-empty categories currently in use, sorted ascending.
    async fn categories(&self) -> Result<Vec<String>>;

    /// Aggregate counters over all notes.
    async fn stats(&self) -> Result<NoteStats>;
}
