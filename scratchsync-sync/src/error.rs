//! Error types for scratchsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use scratchsync_core::CoreError;
use scratchsync_db::DatabaseError;

/// All errors that can arise from reconciliation and output writing.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Root resolution, day rounding, base check, or source loading failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The Scratch LIVE database could not be read or encoded.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// The generated backup path is already taken.
    #[error("Generated backup path already exists: {path}")]
    BackupExists { path: PathBuf },

    /// The backup copy does not hash to the same digest as the original.
    #[error("backup {backup} does not match {original} (sha256 {backup_digest} != {original_digest})")]
    BackupMismatch {
        original: PathBuf,
        backup: PathBuf,
        original_digest: String,
        backup_digest: String,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
