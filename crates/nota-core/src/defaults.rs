//! Centralized default constants for nota.
//!
//! **This module is the single source of truth** for shared default
//! values. The storage and HTTP layers reference these constants instead
//! of defining their own magic values.

// =============================================================================
// NOTES
// =============================================================================

/// Category assigned when the client omits one.
pub const NOTE_CATEGORY: &str = "General";

/// Display color assigned when the client omits one.
pub const NOTE_COLOR: &str = "#3498db";

/// Category filter value that disables category filtering in listings.
pub const CATEGORY_FILTER_ALL: &str = "all";

/// Timestamp format used in list responses.
pub const LIST_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

// =============================================================================
// SERVER
// =============================================================================

/// Default bind address.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default SQLite database URL.
pub const DATABASE_URL: &str = "sqlite://notes.db";

/// Maximum accepted request body size in bytes.
pub const REQUEST_BODY_LIMIT: usize = 1024 * 1024;
