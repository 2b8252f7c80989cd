//! A single `otrk` entry.

use std::path::Path;

use scratchsync_core::TargetEntry;

use crate::chunk::{self, Chunk, Tag, BMIS, PFIL, TADD, TTYP, UADD};
use crate::error::DatabaseError;

/// One track of the database: its fields in file order, plus the decoded
/// `pfil` path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    filebase: String,
    fields: Vec<Chunk>,
}

impl Track {
    /// Mint a track for `filebase` with the minimal set of fields Scratch
    /// LIVE needs to pick it up: file type, path, and "not missing".
    pub fn new(filebase: &str) -> Self {
        let file_type = Path::new(filebase)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        Self {
            filebase: filebase.to_owned(),
            fields: vec![
                Chunk::text(TTYP, &file_type),
                Chunk::text(PFIL, filebase),
                Chunk::bool(BMIS, false),
            ],
        }
    }

    /// Decode the payload of an `otrk` chunk.
    pub fn parse(index: usize, data: &[u8]) -> Result<Self, DatabaseError> {
        let fields = chunk::read_chunks(data)?;
        let filebase = fields
            .iter()
            .find(|f| f.tag == PFIL)
            .ok_or(DatabaseError::MissingPath { index })?
            .as_text()?;
        Ok(Self { filebase, fields })
    }

    /// Encode back into an `otrk` payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DatabaseError> {
        let mut out = Vec::with_capacity(self.fields.iter().map(Chunk::encoded_len).sum());
        chunk::write_chunks(&mut out, &self.fields)?;
        Ok(out)
    }

    pub fn filebase(&self) -> &str {
        &self.filebase
    }

    pub fn fields(&self) -> &[Chunk] {
        &self.fields
    }

    pub fn field(&self, tag: &Tag) -> Option<&Chunk> {
        self.fields.iter().find(|f| &f.tag == tag)
    }

    /// Time added, epoch seconds: `uadd`, else the decimal text in `tadd`,
    /// else 0.
    pub fn time_added(&self) -> i64 {
        if let Some(value) = self.field(&UADD).and_then(Chunk::as_u32) {
            return i64::from(value);
        }
        self.field(&TADD)
            .and_then(|f| f.as_text().ok())
            .and_then(|text| text.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Set both `uadd` and `tadd`.
    ///
    /// `uadd` is an unsigned 32-bit field; values outside its range are
    /// clamped.
    pub fn set_time_added(&mut self, timestamp: i64) {
        let clamped = timestamp.clamp(0, i64::from(u32::MAX));
        if clamped != timestamp {
            tracing::warn!(
                filebase = %self.filebase,
                timestamp,
                "time added outside the 32-bit range, clamping"
            );
        }
        let value = u32::try_from(clamped).unwrap_or(u32::MAX);
        self.upsert(Chunk::text(TADD, &value.to_string()));
        self.upsert(Chunk::u32(UADD, value));
    }

    fn upsert(&mut self, field: Chunk) {
        match self.fields.iter_mut().find(|f| f.tag == field.tag) {
            Some(existing) => existing.data = field.data,
            None => self.fields.push(field),
        }
    }
}

impl TargetEntry for Track {
    fn filebase(&self) -> &str {
        Track::filebase(self)
    }

    fn added_time(&self) -> i64 {
        self.time_added()
    }

    fn set_added_time(&mut self, timestamp: i64) {
        self.set_time_added(timestamp);
    }

    fn can_store_added_time(timestamp: i64) -> bool {
        u32::try_from(timestamp).is_ok()
    }
}
