//! # nota-db
//!
//! SQLite database layer for nota.
//!
//! This crate provides:
//! - Connection pool management
//! - The note repository implementation
//! - Idempotent schema bootstrap for the single `note` table
//!
//! ## Example
//!
//! ```rust,ignore
//! use nota_db::{CreateNoteRequest, Database, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://notes.db").await?;
//!     db.init_schema().await?;
//!
//!     let note = db.notes.create(CreateNoteRequest {
//!         title: "Hello".to_string(),
//!         content: "First note".to_string(),
//!         ..Default::default()
//!     }).await?;
//!
//!     println!("Created note {}", note.id);
//!     Ok(())
//! }
//! ```

pub mod notes;
pub mod pool;

// Re-export core types
pub use nota_core::*;

// Re-export repository implementation and pool helpers
pub use notes::SqliteNoteRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Idempotent bootstrap statement for the single `note` table.
///
/// The repository supplies every column on insert, so defaults live in
/// `nota_core::defaults` rather than in the schema.
const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS note (
    id          INTEGER PRIMARY KEY,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    category    TEXT NOT NULL,
    color       TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    is_pinned   INTEGER NOT NULL,
    tags        TEXT NOT NULL
)";

/// Combined database context: connection pool plus repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Sqlite>,
    /// Note repository for CRUD and query operations.
    pub notes: SqliteNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Sqlite>) -> Self {
        Self {
            notes: SqliteNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Connect to a private in-memory database with the schema applied.
    ///
    /// Limited to a single connection because every SQLite `:memory:`
    /// connection opens its own database.
    // Note: always compiled so integration tests (in tests/) can use it.
    pub async fn connect_test() -> Result<Self> {
        let config = PoolConfig::new().max_connections(1).min_connections(1);
        let db = Self::connect_with_config("sqlite::memory:", config).await?;
        db.init_schema().await?;
        Ok(db)
    }

    /// Create the `note` table if it does not exist yet.
    ///
    /// Called once at startup; safe to call repeatedly.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Sqlite> {
        &self.pool
    }
}
