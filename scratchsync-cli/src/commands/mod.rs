//! Subcommand implementations.

pub mod status;
pub mod sync;
