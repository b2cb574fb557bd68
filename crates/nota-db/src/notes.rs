//! Note repository implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Row, Sqlite, Transaction};

use nota_core::{
    defaults, join_tags, split_tags, validate_tags, CreateNoteRequest, Error, ListNotesRequest,
    Note, NoteRepository, NoteStats, Result, UpdateNoteRequest,
};

use crate::escape_like;

/// Columns fetched whenever a full note row is read back.
const NOTE_COLUMNS: &str =
    "id, title, content, category, color, created_at, updated_at, is_pinned, tags";

/// SQLite implementation of NoteRepository.
#[derive(Clone)]
pub struct SqliteNoteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteNoteRepository {
    /// Create a new SqliteNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

/// Map a database row to a Note.
fn map_row_to_note(row: &sqlx::sqlite::SqliteRow) -> Note {
    let tags_str: String = row.get("tags");

    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        category: row.get("category"),
        color: row.get("color"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        is_pinned: row.get("is_pinned"),
        tags: split_tags(&tags_str),
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn create(&self, req: CreateNoteRequest) -> Result<Note> {
        if let Some(tags) = &req.tags {
            validate_tags(tags)?;
        }

        let category = req
            .category
            .unwrap_or_else(|| defaults::NOTE_CATEGORY.to_string());
        let color = req
            .color
            .unwrap_or_else(|| defaults::NOTE_COLOR.to_string());
        let is_pinned = req.is_pinned.unwrap_or(false);
        let tags = join_tags(&req.tags.unwrap_or_default());
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let result = sqlx::query(
            "INSERT INTO note (title, content, category, color, created_at, updated_at, is_pinned, tags) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&req.title)
        .bind(&req.content)
        .bind(&category)
        .bind(&color)
        .bind(now)
        .bind(now)
        .bind(is_pinned)
        .bind(&tags)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        let id = result.last_insert_rowid();
        let note = self.fetch_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(note)
    }

    async fn list(&self, req: ListNotesRequest) -> Result<Vec<Note>> {
        let mut query = format!("SELECT {} FROM note WHERE 1=1 ", NOTE_COLUMNS);

        let category_param = req.category.filter(|category| {
            !category.is_empty() && category.as_str() != defaults::CATEGORY_FILTER_ALL
        });
        if category_param.is_some() {
            query.push_str("AND category = ? ");
        }

        // Needle and columns fold through the same SQLite LOWER; the
        // fold is ASCII-only, so non-ASCII text matches verbatim.
        let search_param = req
            .search
            .filter(|search| !search.is_empty())
            .map(|search| format!("%{}%", escape_like(&search)));
        if search_param.is_some() {
            query.push_str(
                "AND (LOWER(title) LIKE LOWER(?) ESCAPE '\\' \
                 OR LOWER(content) LIKE LOWER(?) ESCAPE '\\' \
                 OR LOWER(tags) LIKE LOWER(?) ESCAPE '\\') ",
            );
        }

        query.push_str("ORDER BY is_pinned DESC, updated_at DESC");

        let mut q = sqlx::query(&query);
        if let Some(ref category) = category_param {
            q = q.bind(category);
        }
        if let Some(ref pattern) = search_param {
            q = q.bind(pattern).bind(pattern).bind(pattern);
        }

        let rows = q.fetch_all(&self.pool).await.map_err(Error::Database)?;
        Ok(rows.iter().map(map_row_to_note).collect())
    }

    async fn fetch(&self, id: i64) -> Result<Note> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let note = self.fetch_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(note)
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM note WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.is_some())
    }

    async fn update(&self, id: i64, req: UpdateNoteRequest) -> Result<Note> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        // A missing id maps to NotFound before any write is attempted.
        if !self.exists_tx(&mut tx, id).await? {
            return Err(Error::NoteNotFound(id));
        }

        // Validation runs after the existence check: an unknown id
        // reports NotFound even when the payload is also invalid.
        if let Some(tags) = &req.tags {
            validate_tags(tags)?;
        }

        // Build the SET clause from the fields that are present. Bind
        // order below must match the order clauses are pushed here.
        let mut updates: Vec<&str> = vec!["updated_at = ?"];
        if req.title.is_some() {
            updates.push("title = ?");
        }
        if req.content.is_some() {
            updates.push("content = ?");
        }
        if req.category.is_some() {
            updates.push("category = ?");
        }
        if req.color.is_some() {
            updates.push("color = ?");
        }
        if req.is_pinned.is_some() {
            updates.push("is_pinned = ?");
        }
        let stored_tags = req.tags.as_deref().map(join_tags);
        if stored_tags.is_some() {
            updates.push("tags = ?");
        }

        let query = format!("UPDATE note SET {} WHERE id = ?", updates.join(", "));
        let now = Utc::now();

        let mut q = sqlx::query(&query).bind(now);
        if let Some(ref title) = req.title {
            q = q.bind(title);
        }
        if let Some(ref content) = req.content {
            q = q.bind(content);
        }
        if let Some(ref category) = req.category {
            q = q.bind(category);
        }
        if let Some(ref color) = req.color {
            q = q.bind(color);
        }
        if let Some(is_pinned) = req.is_pinned {
            q = q.bind(is_pinned);
        }
        if let Some(ref tags) = stored_tags {
            q = q.bind(tags);
        }
        q = q.bind(id);

        q.execute(&mut *tx).await.map_err(Error::Database)?;

        let note = self.fetch_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(note)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let result = sqlx::query("DELETE FROM note WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }

        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let rows =
            sqlx::query("SELECT DISTINCT category FROM note WHERE category <> '' ORDER BY category")
                .fetch_all(&self.pool)
                .await
                .map_err(Error::Database)?;
        Ok(rows.iter().map(|row| row.get("category")).collect())
    }

    async fn stats(&self) -> Result<NoteStats> {
        // One transaction so the three counters describe the same snapshot.
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let total_notes: i64 = sqlx::query("SELECT COUNT(*) AS count FROM note")
            .fetch_one(&mut *tx)
            .await
            .map_err(Error::Database)?
            .get("count");

        let rows = sqlx::query("SELECT category, COUNT(*) AS count FROM note GROUP BY category")
            .fetch_all(&mut *tx)
            .await
            .map_err(Error::Database)?;
        let mut categories = BTreeMap::new();
        for row in &rows {
            categories.insert(row.get("category"), row.get("count"));
        }

        let pinned_notes: i64 = sqlx::query("SELECT COUNT(*) AS count FROM note WHERE is_pinned = 1")
            .fetch_one(&mut *tx)
            .await
            .map_err(Error::Database)?
            .get("count");

        tx.commit().await.map_err(Error::Database)?;

        Ok(NoteStats {
            total_notes,
            categories,
            pinned_notes,
        })
    }
}

// =============================================================================
// TRANSACTION-AWARE VARIANTS
// =============================================================================

impl SqliteNoteRepository {
    /// Fetch a note within an existing transaction.
    async fn fetch_tx(&self, tx: &mut Transaction<'_, Sqlite>, id: i64) -> Result<Note> {
        let row = sqlx::query(&format!("SELECT {} FROM note WHERE id = ?", NOTE_COLUMNS))
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Error::Database)?;

        match row {
            Some(row) => Ok(map_row_to_note(&row)),
            None => Err(Error::NoteNotFound(id)),
        }
    }

    /// Check note existence within an existing transaction.
    async fn exists_tx(&self, tx: &mut Transaction<'_, Sqlite>, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM note WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Error::Database)?;
        Ok(row.is_some())
    }
}
