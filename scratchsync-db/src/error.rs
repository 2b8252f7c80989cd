//! Error types for scratchsync-db.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise reading or writing a Scratch LIVE database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Fewer than 8 bytes remained where a chunk header was expected.
    #[error("truncated chunk header at offset {offset}")]
    TruncatedHeader { offset: usize },

    /// A chunk declared more payload than the buffer holds.
    #[error("chunk '{tag}' at offset {offset} declares {declared} bytes but only {available} remain")]
    TruncatedPayload {
        tag: String,
        offset: usize,
        declared: usize,
        available: usize,
    },

    /// A payload is too large for the 32-bit length field.
    #[error("chunk '{tag}' payload of {len} bytes exceeds the 32-bit length field")]
    PayloadTooLarge { tag: String, len: usize },

    /// A text field is not valid UTF-16BE.
    #[error("field '{tag}' is not valid UTF-16: {reason}")]
    InvalidText { tag: String, reason: String },

    /// A track chunk has no `pfil` path field.
    #[error("track #{index} has no file path")]
    MissingPath { index: usize },

    /// Underlying I/O failure, annotated with the database path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`DatabaseError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DatabaseError {
    DatabaseError::Io {
        path: path.into(),
        source,
    }
}
