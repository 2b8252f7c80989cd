//! Shared sync pipeline entrypoint: load both libraries, reconcile, write.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use scratchsync_core::{rhythmdb, source};
use scratchsync_db::ScratchDatabase;

use crate::reconcile::{self, ReconciliationReport};
use crate::writer::{self, WriteOutcome};
use crate::SyncError;

/// Everything one pipeline run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Scratch LIVE database to read.
    pub database: PathBuf,
    /// Rhythmbox `rhythmdb.xml`.
    pub rhythmdb: PathBuf,
    /// Where the corrected database is written; may equal `database`.
    pub outfile: PathBuf,
    pub require_base: Option<String>,
    pub dry_run: bool,
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub report: ReconciliationReport,
    pub write: WriteOutcome,
    /// Track count after reconciliation.
    pub entries: usize,
}

/// Run the pipeline for `request`.
///
/// Nothing is written unless both libraries load and reconciliation
/// succeeds.
pub fn run(request: &SyncRequest, now: DateTime<Local>) -> Result<SyncOutcome, SyncError> {
    let mut database = ScratchDatabase::open_at(&request.database)?;
    tracing::debug!(path = %request.database.display(), tracks = database.len(), "loaded database");

    let records = rhythmdb::read_at(&request.rhythmdb)?;
    let source_map = source::load(records)?;
    tracing::debug!(path = %request.rhythmdb.display(), songs = source_map.len(), "loaded rhythmdb");

    let report = reconcile::sync(&mut database, source_map, request.require_base.as_deref())?;

    let bytes = database.to_bytes()?;
    let write = writer::write_output(&request.outfile, &bytes, request.dry_run, now)?;

    Ok(SyncOutcome {
        report,
        write,
        entries: database.len(),
    })
}
