//! scratchsync core library: domain types, root detection, day rounding,
//! and Rhythmbox source loading.
//!
//! - [`types`]: source records, the source map, target-library traits
//! - [`error`]: [`CoreError`]
//! - [`root`]: shared-root detection
//! - [`timestamp`]: local-midnight rounding
//! - [`rhythmdb`]: `rhythmdb.xml` reader
//! - [`source`]: records → root-relative [`SourceMap`]

pub mod error;
pub mod rhythmdb;
pub mod root;
pub mod source;
pub mod timestamp;
pub mod types;

pub use error::CoreError;
pub use types::{SourceMap, SourceRecord, TargetEntry, TargetLibrary};
