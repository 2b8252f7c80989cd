//! scratchsync: keep a Serato Scratch LIVE database in step with Rhythmbox.
//!
//! # Usage
//!
//! ```text
//! scratchsync sync <database> [--rhythmdb PATH] [--in-place | --outfile PATH]
//!                             [--require-base BASE] [--dry-run] [--json]
//! scratchsync status <database> [--rhythmdb PATH]
//! scratchsync --debug ...
//! ```
//!
//! Only the Scratch LIVE database is altered: entries missing from Rhythmbox
//! are removed, new Rhythmbox songs are added, and every entry's time added
//! is set to its Rhythmbox first-seen day.

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{status::StatusArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "scratchsync",
    version,
    about = "Sync a Scratch LIVE database with the Rhythmbox library",
    long_about = None,
)]
struct Cli {
    /// Print debug output to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remove missing files, add new ones, and sync time added.
    Sync(SyncArgs),

    /// Show entry counts and detected base directories of both libraries.
    Status(StatusArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug);
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}
