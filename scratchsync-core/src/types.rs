//! Domain types shared by the loader, the codec, and the reconciliation engine.
//!
//! The target library is only ever seen through [`TargetLibrary`] and
//! [`TargetEntry`], so the engine does not depend on any file format.

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Source side
// ---------------------------------------------------------------------------

/// One raw entry read from the Rhythmbox catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceRecord {
    /// `true` when the entry's `type` attribute is `song`.
    pub is_song: bool,
    /// The `file:///` URI exactly as stored in the catalog.
    pub location: String,
    pub hidden: bool,
    /// First-seen time, epoch seconds.
    pub first_seen: i64,
}

impl SourceRecord {
    /// A visible song record, the common case in tests and fixtures.
    pub fn song(location: impl Into<String>, first_seen: i64) -> Self {
        Self {
            is_song: true,
            location: location.into(),
            hidden: false,
            first_seen,
        }
    }
}

/// Root-relative path → first-seen epoch seconds.
///
/// Ordered so that anything derived from iteration (the list of added
/// entries, for one) is deterministic.
pub type SourceMap = BTreeMap<String, i64>;

// ---------------------------------------------------------------------------
// Target side
// ---------------------------------------------------------------------------

/// A single entry of the library being corrected.
pub trait TargetEntry {
    /// Path of the file this entry refers to.
    fn filebase(&self) -> &str;

    /// "Time added", epoch seconds.
    fn added_time(&self) -> i64;

    fn set_added_time(&mut self, timestamp: i64);

    /// Whether `timestamp` can be stored without loss. The reconciliation
    /// engine refuses to plan a time it could not write back.
    fn can_store_added_time(_timestamp: i64) -> bool
    where
        Self: Sized,
    {
        true
    }
}

/// The mutable collection of entries the reconciliation engine edits.
pub trait TargetLibrary {
    type Entry: TargetEntry;

    fn entries(&self) -> &[Self::Entry];

    fn entries_mut(&mut self) -> &mut [Self::Entry];

    /// Build a fresh entry for `filebase`. The entry is not added to the
    /// library until it is passed to [`TargetLibrary::append`].
    fn make_entry(&self, filebase: &str) -> Self::Entry;

    fn append(&mut self, entry: Self::Entry);

    /// Remove and return the entry at `index`, shifting later entries down.
    fn remove(&mut self, index: usize) -> Self::Entry;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_constructor_is_visible() {
        let record = SourceRecord::song("file:///music/a.mp3", 10);
        assert!(record.is_song);
        assert!(!record.hidden);
        assert_eq!(record.first_seen, 10);
    }

    #[test]
    fn default_record_is_not_a_song() {
        let record = SourceRecord::default();
        assert!(!record.is_song);
        assert!(record.location.is_empty());
    }
}
