//! Whole-file `database V2` load and save.

use std::path::Path;

use scratchsync_core::TargetLibrary;

use crate::chunk::{self, Chunk, OTRK, VRSN};
use crate::error::{io_err, DatabaseError};
use crate::track::Track;

/// Version string written into databases created from scratch.
pub const DEFAULT_VERSION: &str = "2.0/Serato Scratch LIVE Database";

/// An in-memory Scratch LIVE database.
///
/// Non-track chunks (the `vrsn` header and anything unrecognised) are kept
/// verbatim and written before the tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchDatabase {
    header: Vec<Chunk>,
    tracks: Vec<Track>,
}

impl Default for ScratchDatabase {
    fn default() -> Self {
        Self {
            header: vec![Chunk::text(VRSN, DEFAULT_VERSION)],
            tracks: Vec::new(),
        }
    }
}

impl ScratchDatabase {
    /// An empty database carrying only the default version header.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, DatabaseError> {
        let mut header = Vec::new();
        let mut tracks = Vec::new();

        for chunk in chunk::read_chunks(bytes)? {
            if chunk.tag == OTRK {
                tracks.push(Track::parse(tracks.len(), &chunk.data)?);
            } else {
                header.push(chunk);
            }
        }

        tracing::debug!(tracks = tracks.len(), "parsed scratch live database");
        Ok(Self { header, tracks })
    }

    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
        Self::parse(&bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DatabaseError> {
        let mut out = Vec::new();
        chunk::write_chunks(&mut out, &self.header)?;
        for track in &self.tracks {
            chunk::write_chunk(&mut out, &OTRK, &track.to_bytes()?)?;
        }
        Ok(out)
    }

    /// Serialize and write to `path` (plain write; callers wanting backups
    /// and atomic replacement go through the sync writer).
    pub fn save_at(&self, path: &Path) -> Result<(), DatabaseError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(|e| io_err(path, e))
    }

    /// The `vrsn` header text, if present and decodable.
    pub fn version(&self) -> Option<String> {
        self.header
            .iter()
            .find(|c| c.tag == VRSN)
            .and_then(|c| c.as_text().ok())
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl TargetLibrary for ScratchDatabase {
    type Entry = Track;

    fn entries(&self) -> &[Track] {
        &self.tracks
    }

    fn entries_mut(&mut self) -> &mut [Track] {
        &mut self.tracks
    }

    fn make_entry(&self, filebase: &str) -> Track {
        Track::new(filebase)
    }

    fn append(&mut self, entry: Track) {
        self.tracks.push(entry);
    }

    fn remove(&mut self, index: usize) -> Track {
        self.tracks.remove(index)
    }
}

impl FromIterator<Track> for ScratchDatabase {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self {
            tracks: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scratchsync_core::TargetEntry;
    use tempfile::TempDir;

    fn sample() -> ScratchDatabase {
        ["music/A/one.mp3", "music/B/two.mp3"]
            .into_iter()
            .enumerate()
            .map(|(i, path)| {
                let mut track = Track::new(path);
                track.set_time_added(1_000 + i as i64);
                track
            })
            .collect()
    }

    #[test]
    fn serialized_database_parses_back_equal() {
        let db = sample();
        let parsed = ScratchDatabase::parse(&db.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, db);
        assert_eq!(parsed.version().as_deref(), Some(DEFAULT_VERSION));
    }

    #[test]
    fn parse_then_serialize_is_byte_identical() {
        let mut bytes = Vec::new();
        chunk::write_chunk(&mut bytes, &VRSN, &chunk::encode_utf16("2.0/custom")).unwrap();
        chunk::write_chunk(&mut bytes, b"zzzz", &[9, 9]).unwrap();
        let track = Track::new("x/y.wav").to_bytes().unwrap();
        chunk::write_chunk(&mut bytes, &OTRK, &track).unwrap();

        let db = ScratchDatabase::parse(&bytes).unwrap();
        assert_eq!(db.len(), 1);
        assert_eq!(db.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn library_trait_edits_tracks() {
        let mut db = sample();
        let entry = db.make_entry("music/C/three.mp3");
        db.append(entry);
        assert_eq!(db.entries().len(), 3);

        db.entries_mut()[0].set_added_time(42);
        assert_eq!(db.tracks()[0].time_added(), 42);

        let removed = db.remove(1);
        assert_eq!(removed.filebase(), "music/B/two.mp3");
        assert_eq!(db.len(), 2);
    }

    #[test]
    fn save_and_open_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("database V2");
        let db = sample();
        db.save_at(&path).unwrap();
        assert_eq!(ScratchDatabase::open_at(&path).unwrap(), db);
    }

    #[test]
    fn open_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let err = ScratchDatabase::open_at(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, DatabaseError::Io { .. }));
        assert!(err.to_string().contains("missing"));
    }
}
