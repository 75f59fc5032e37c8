//! # Errors
//!
//! | Type | When | Handling |
//! |------|------|----------|
//! | [`StoreError::SourceUnavailable`] | source file missing | engine warns, source is empty |
//! | [`StoreError::MalformedRecord`] | a record has a missing/mistyped field | whole source rejected, empty |
//! | [`StoreError::DuplicatePosition`] | two records share an id | whole source rejected, empty |
//! | [`QueryError`] | unknown id or topic | returned to the caller |
//!
//! Store errors never escape [`Engine`](crate::Engine) construction; they
//! degrade to an empty corpus. Query errors are plain values and serialize
//! as `{"error": "<message>"}`.

use std::path::PathBuf;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::core::PositionId;

/// Failure to read one corpus source.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("source not found: {path:?}")]
    SourceUnavailable { path: PathBuf },

    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record in {path:?}: {source}")]
    MalformedRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate position id {id}")]
    DuplicatePosition { id: PositionId },
}

/// A query that referenced something the corpus does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Position {0} not found")]
    PositionNotFound(PositionId),

    #[error("No positions found for topic: {0}")]
    TopicNotFound(String),
}

impl Serialize for QueryError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("error", &self.to_string())?;
        map.end()
    }
}
