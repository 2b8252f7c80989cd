//! Reconciliation of a target library against the Rhythmbox source map.
//!
//! [`sync`] works in two phases. The plan phase only reads the library: it
//! resolves the target root, checks it against the required base, walks a
//! snapshot of the entries while draining matched keys out of the source
//! map, and rounds every timestamp it will need. The apply phase then edits
//! the library. Everything that can fail happens in the plan phase, so an
//! error leaves the library exactly as it was.

use serde::Serialize;

use scratchsync_core::{
    root,
    timestamp::round_to_day,
    CoreError, SourceMap, TargetEntry, TargetLibrary,
};

use crate::error::SyncError;

/// A matched entry whose "time added" was rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampChange {
    pub key: String,
    pub old: i64,
    pub new: i64,
}

/// What one [`sync`] call did, keyed by root-relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    /// The detected target root every key is relative to.
    pub root: String,
    /// Entries dropped because the source no longer has them, in library order.
    pub removed: Vec<String>,
    /// Entries created for source items the target lacked, in key order.
    pub added: Vec<String>,
    /// Entries whose time added was corrected, in library order.
    pub changed: Vec<TimestampChange>,
}

impl ReconciliationReport {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    pub fn changed_count(&self) -> usize {
        self.changed.len()
    }

    /// `true` when the library already agreed with the source.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.changed.is_empty()
    }
}

/// Make `library` agree with `source`.
///
/// `source` is consumed: matched keys are drained from it and whatever is
/// left becomes new entries under the target root. When `required_base` is
/// given the detected target root must equal it exactly.
pub fn sync<L: TargetLibrary>(
    library: &mut L,
    mut source: SourceMap,
    required_base: Option<&str>,
) -> Result<ReconciliationReport, SyncError> {
    let base = root::resolve(library.entries().iter().map(|e| e.filebase()))?;
    tracing::debug!(base = %base, "found scratchlivedb base");

    if let Some(required) = required_base {
        if required != base {
            return Err(CoreError::BaseMismatch {
                required: required.to_owned(),
                detected: base,
            }
            .into());
        }
    }

    let mut report = ReconciliationReport {
        root: base.clone(),
        ..ReconciliationReport::default()
    };

    // Plan: read-only pass over the current entries.
    let mut removals = Vec::new();
    let mut updates = Vec::new();
    for (index, entry) in library.entries().iter().enumerate() {
        let key = root::relative(entry.filebase(), &base);
        let Some(first_seen) = source.remove(key) else {
            tracing::debug!(key, "not in rhythmbox, removing");
            removals.push(index);
            report.removed.push(key.to_owned());
            continue;
        };

        let new = storable_day::<L::Entry>(first_seen)?;
        let old = entry.added_time();
        if new != old {
            tracing::debug!(key, old, new, "time added differs");
            updates.push((index, new));
            report.changed.push(TimestampChange {
                key: key.to_owned(),
                old,
                new,
            });
        }
    }

    let mut additions = Vec::with_capacity(source.len());
    for (key, first_seen) in source {
        additions.push((format!("{base}{key}"), storable_day::<L::Entry>(first_seen)?));
        report.added.push(key);
    }

    // Apply.
    let entries = library.entries_mut();
    for (index, new) in updates {
        entries[index].set_added_time(new);
    }
    for index in removals.into_iter().rev() {
        library.remove(index);
    }
    for (filebase, added) in additions {
        let mut entry = library.make_entry(&filebase);
        entry.set_added_time(added);
        library.append(entry);
    }

    tracing::info!(
        removed = report.removed_count(),
        added = report.added_count(),
        changed = report.changed_count(),
        "reconciliation complete"
    );
    Ok(report)
}

/// `first_seen` rounded to its day, provided entries of type `E` can hold
/// the result exactly.
fn storable_day<E: TargetEntry>(first_seen: i64) -> Result<i64, CoreError> {
    let day = round_to_day(first_seen)?;
    if E::can_store_added_time(day) {
        Ok(day)
    } else {
        Err(CoreError::TimestampOutOfRange(day))
    }
}
