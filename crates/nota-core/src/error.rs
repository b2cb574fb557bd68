//! Error types for nota.

use thiserror::Error;

/// Result type alias using nota's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for nota operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Note not found
    #[error("Note {0} not found")]
    NoteNotFound(i64),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
