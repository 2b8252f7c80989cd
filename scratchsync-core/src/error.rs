//! Error types for scratchsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while resolving roots, normalizing timestamps,
/// or loading the Rhythmbox library.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Root resolution was asked for the common prefix of zero paths.
    #[error("cannot resolve a shared root from an empty set of paths")]
    EmptyInput,

    /// A visible song's location does not carry the `file:///` URI prefix.
    #[error("rhythmbox location didn't start with expected {expected}: '{location}'")]
    MalformedRecord {
        location: String,
        expected: &'static str,
    },

    /// A song entry is missing a field, or the field could not be parsed.
    #[error("invalid rhythmbox entry #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// The computed target root disagrees with the root the caller required.
    #[error("Required base '{required}' doesn't match detected base '{detected}'")]
    BaseMismatch { required: String, detected: String },

    /// A timestamp cannot be represented as a local calendar date, or does
    /// not fit the target library's time field.
    #[error("timestamp {0} is outside the representable range")]
    TimestampOutOfRange(i64),

    /// The Rhythmbox XML file did not exist at the expected path.
    #[error("Didn't find rhythmdb at {path}")]
    SourceNotFound { path: PathBuf },

    /// Underlying I/O failure, annotated with the path being read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The Rhythmbox file is not well-formed XML.
    #[error("failed to parse rhythmdb at {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
