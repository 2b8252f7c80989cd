//! # scratchsync-sync
//!
//! Reconciliation engine and backup-gated output writer.
//!
//! Call [`reconcile::sync`] to bring any [`scratchsync_core::TargetLibrary`]
//! in line with a source map, or [`pipeline::run`] to do the whole
//! load → reconcile → back up → write cycle on files.

pub mod error;
pub mod pipeline;
pub mod reconcile;
pub mod writer;

pub use error::SyncError;
pub use reconcile::{sync, ReconciliationReport, TimestampChange};
pub use writer::{write_output, WriteOutcome};
