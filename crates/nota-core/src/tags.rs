//! Tag validation and the comma-joined storage encoding.
//!
//! Tags are persisted as a single comma-joined TEXT column. The encoding
//! is lossless only because [`validate_tag`] rejects the two inputs it
//! cannot represent: empty tags and tags containing the delimiter.

use crate::error::{Error, Result};

/// Validate a single tag label.
///
/// Tags must be non-empty and must not contain a comma (the storage
/// delimiter).
pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() {
        return Err(Error::InvalidInput("Tag must not be empty".to_string()));
    }
    if tag.contains(',') {
        return Err(Error::InvalidInput(format!(
            "Tag '{}' must not contain a comma",
            tag
        )));
    }
    Ok(())
}

/// Validate every tag in a list, failing on the first invalid one.
pub fn validate_tags(tags: &[String]) -> Result<()> {
    for tag in tags {
        validate_tag(tag)?;
    }
    Ok(())
}

/// Join tags into the stored form. An empty list encodes as "".
pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

/// Split the stored form back into the tag list, preserving order.
pub fn split_tags(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        Vec::new()
    } else {
        stored.split(',').map(String::from).collect()
    }
}
