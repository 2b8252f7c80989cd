//! Backup-then-replace writer for the output database.
//!
//! ## `write_output` protocol
//!
//! 1. Serialize the database (already done by caller).
//! 2. If the output path exists, derive a timestamped backup path; refuse to
//!    continue if it is already taken.
//! 3. Copy the output file to the backup path.
//! 4. SHA-256 both files → abort if the digests differ.
//! 5. Write to `<path>.scratchsync.tmp`.
//! 6. Rename to final path (atomic on POSIX).
//!
//! The output file is never touched before step 4 succeeds.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Write outcome
// ---------------------------------------------------------------------------

/// What [`write_output`] did (or, in dry-run mode, would have done).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Where the previous output file was copied, if one existed.
    pub backup: Option<PathBuf>,
    pub output: PathBuf,
    pub dry_run: bool,
}

// ---------------------------------------------------------------------------
// Backup path
// ---------------------------------------------------------------------------

/// `<outfile>-<YYYY-MM-DD_HH_MM_SS.ffffff>.bak`, next to `outfile`.
///
/// Spaces and colons in the file name are replaced with `_`; the directory
/// part is left alone.
pub fn backup_path_for(outfile: &Path, now: DateTime<Local>) -> PathBuf {
    let stamp = now.format("%Y-%m-%d %H:%M:%S%.6f");
    let file_name = outfile
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = format!("{file_name}-{stamp}.bak").replace([' ', ':'], "_");
    outfile.with_file_name(name)
}

// ---------------------------------------------------------------------------
// write_output
// ---------------------------------------------------------------------------

/// Back up `outfile` if it exists, then atomically replace it with `content`.
pub fn write_output(
    outfile: &Path,
    content: &[u8],
    dry_run: bool,
    now: DateTime<Local>,
) -> Result<WriteOutcome, SyncError> {
    let tmp = PathBuf::from(format!("{}.scratchsync.tmp", outfile.display()));
    write_output_with_tmp(outfile, content, dry_run, now, &tmp)
}

fn write_output_with_tmp(
    outfile: &Path,
    content: &[u8],
    dry_run: bool,
    now: DateTime<Local>,
    tmp: &Path,
) -> Result<WriteOutcome, SyncError> {
    let backup = if outfile.exists() {
        let backup = backup_path_for(outfile, now);
        if backup.exists() {
            return Err(SyncError::BackupExists { path: backup });
        }
        if dry_run {
            tracing::info!("[dry-run] would back up {} to {}", outfile.display(), backup.display());
        } else {
            create_verified_backup(outfile, &backup)?;
        }
        Some(backup)
    } else {
        None
    };

    if dry_run {
        tracing::info!("[dry-run] would write: {}", outfile.display());
        return Ok(WriteOutcome {
            backup,
            output: outfile.to_path_buf(),
            dry_run,
        });
    }

    if let Some(tmp_parent) = tmp.parent() {
        if !tmp_parent.as_os_str().is_empty() {
            std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
        }
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, outfile) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(outfile, e));
    }

    tracing::info!("wrote: {}", outfile.display());
    Ok(WriteOutcome {
        backup,
        output: outfile.to_path_buf(),
        dry_run,
    })
}

fn create_verified_backup(original: &Path, backup: &Path) -> Result<(), SyncError> {
    std::fs::copy(original, backup).map_err(|e| io_err(backup, e))?;

    let original_digest = hash_file(original)?;
    let backup_digest = hash_file(backup)?;
    if original_digest != backup_digest {
        return Err(SyncError::BackupMismatch {
            original: original.to_path_buf(),
            backup: backup.to_path_buf(),
            original_digest,
            backup_digest,
        });
    }

    tracing::info!("backed up {} to {}", original.display(), backup.display());
    Ok(())
}

fn hash_file(path: &Path) -> Result<String, SyncError> {
    let content = std::fs::read(path).map_err(|e| io_err(path, e))?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(hex::encode(hasher.finalize()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
