// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Errors and diagnostics.
//!
//! A `TreeError` fails the request that raised it. A `Diagnostic` is a
//! data-quality finding collected while indexing; the offending record is
//! skipped or resolved first-match-wins and the traversal carries on.

use thiserror::Error;

use crate::record::Key;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("cycle detected: id {0} is its own ancestor")]
    CycleDetected(Key),

    #[error("hierarchy is deeper than the limit of {limit} levels")]
    DepthExceeded { limit: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TreeError>;

/// A non-fatal finding about the input records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The record at `position` lacks a usable `field` and was excluded.
    #[error("record {position} has no usable `{field}` field and was skipped")]
    MissingField { position: usize, field: String },

    /// Two records share an id; lookups that take one match use `first`.
    #[error("id {id} appears at records {first} and {duplicate}")]
    DuplicateId { id: Key, first: usize, duplicate: usize },
}
