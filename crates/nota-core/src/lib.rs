//! # nota-core
//!
//! Core types, traits, and abstractions for the nota notes backend.
//!
//! This crate provides the data model, the repository trait, and the
//! shared defaults that the storage and HTTP layers depend on.

pub mod defaults;
pub mod error;
pub mod models;
pub mod tags;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use tags::{join_tags, split_tags, validate_tag, validate_tags};
pub use traits::*;
