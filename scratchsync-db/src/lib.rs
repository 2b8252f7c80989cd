//! # scratchsync-db
//!
//! Reader and writer for the Serato Scratch LIVE `database V2` file.
//!
//! [`ScratchDatabase`] implements [`scratchsync_core::TargetLibrary`], which
//! is all the reconciliation engine needs to see of it.

pub mod chunk;
pub mod database;
pub mod error;
pub mod track;

pub use database::ScratchDatabase;
pub use error::DatabaseError;
pub use track::Track;
