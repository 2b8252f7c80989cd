//! `scratchsync sync`: reconcile a Scratch LIVE database with Rhythmbox.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use serde::Serialize;

use scratchsync_core::timestamp::format_local;
use scratchsync_sync::{
    pipeline::{self, SyncRequest},
    ReconciliationReport, WriteOutcome,
};

use crate::config;

/// Arguments for `scratchsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the Scratch LIVE database file, e.g. "/path/to/database V2".
    pub database: PathBuf,

    /// Path to the Rhythmbox XML database.
    /// Defaults to ~/.local/share/rhythmbox/rhythmdb.xml.
    #[arg(long, value_name = "PATH")]
    pub rhythmdb: Option<PathBuf>,

    /// Overwrite the database in place, making a backup first.
    #[arg(long, conflicts_with = "outfile")]
    pub in_place: bool,

    /// New database file to write (default: ./out.db).
    #[arg(long, value_name = "PATH")]
    pub outfile: Option<PathBuf>,

    /// Require this string to be the base directory of every entry in the
    /// Scratch LIVE database. Stops a stray file elsewhere on disk from
    /// skewing the detected base.
    #[arg(long, value_name = "BASE")]
    pub require_base: Option<String>,

    /// Don't save any changes.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct SyncJson<'a> {
    report: &'a ReconciliationReport,
    backup: Option<&'a PathBuf>,
    output: &'a PathBuf,
    dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let home = config::home()?;
        let config = config::load_at(&home).context("failed to load scratchsync config")?;

        let outfile = if self.in_place {
            self.database.clone()
        } else {
            config.outfile_path(self.outfile)
        };
        let request = SyncRequest {
            rhythmdb: config.rhythmdb_path(self.rhythmdb, &home),
            require_base: config.require_base(self.require_base),
            database: self.database,
            outfile,
            dry_run: self.dry_run,
        };

        if !self.json {
            println!("Parsing database: {}", request.database.display());
            println!("Parsing rhythmbox DB");
        }

        let outcome = pipeline::run(&request, Local::now()).with_context(|| {
            format!(
                "sync failed for '{}' against '{}'",
                request.database.display(),
                request.rhythmdb.display()
            )
        })?;

        if self.json {
            let payload = SyncJson {
                report: &outcome.report,
                backup: outcome.write.backup.as_ref(),
                output: &outcome.write.output,
                dry_run: outcome.write.dry_run,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize report JSON")?
            );
            return Ok(());
        }

        print_report(&outcome.report);
        print_write(&outcome.write);
        Ok(())
    }
}

fn line(desc: &str, value: &str) {
    println!("{:<20} {}", format!("{desc}:"), value);
}

fn print_report(report: &ReconciliationReport) {
    for key in &report.removed {
        line("Removing from DB", key);
    }
    for change in &report.changed {
        line(
            "Changing timeadded",
            &format!(
                "{} {}->{}",
                change.key,
                format_local(change.old),
                format_local(change.new)
            ),
        );
    }
    for key in &report.added {
        line("Adding to DB", key);
    }

    println!();
    println!("Total removed: {}", report.removed_count());
    println!("Total added:   {}", report.added_count());
    println!("Total changed: {}", report.changed_count());
}

fn print_write(write: &WriteOutcome) {
    let dry = if write.dry_run { " (dry)" } else { "" };
    if let Some(backup) = &write.backup {
        println!("Backing up to {}{dry}", backup.display());
    }
    println!("Writing {}{dry}", write.output.display());
}
