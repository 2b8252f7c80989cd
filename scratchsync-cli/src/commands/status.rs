//! `scratchsync status`: entry counts and detected roots of both libraries.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use scratchsync_core::{rhythmdb, root, source};
use scratchsync_db::ScratchDatabase;

use crate::config;

/// Arguments for `scratchsync status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Path to the Scratch LIVE database file.
    pub database: PathBuf,

    /// Path to the Rhythmbox XML database.
    #[arg(long, value_name = "PATH")]
    pub rhythmdb: Option<PathBuf>,
}

#[derive(Tabled)]
struct LibraryRow {
    #[tabled(rename = "library")]
    library: &'static str,
    #[tabled(rename = "path")]
    path: String,
    #[tabled(rename = "entries")]
    entries: usize,
    #[tabled(rename = "detected base")]
    base: String,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let home = config::home()?;
        let config = config::load_at(&home).context("failed to load scratchsync config")?;
        let rhythmdb_path = config.rhythmdb_path(self.rhythmdb, &home);

        let database = ScratchDatabase::open_at(&self.database)
            .with_context(|| format!("failed to read '{}'", self.database.display()))?;
        let songs = rhythmdb::read_at(&rhythmdb_path)
            .and_then(source::visible_songs)
            .with_context(|| format!("failed to read '{}'", rhythmdb_path.display()))?;

        let rows = vec![
            LibraryRow {
                library: "scratch live",
                path: self.database.display().to_string(),
                entries: database.len(),
                base: base_or_dash(database.tracks().iter().map(|t| t.filebase())),
            },
            LibraryRow {
                library: "rhythmbox",
                path: rhythmdb_path.display().to_string(),
                entries: songs.len(),
                base: base_or_dash(songs.iter().map(|(path, _)| path.as_str())),
            },
        ];

        println!("{}", "LIBRARIES".bold());
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");

        if let Some(version) = database.version() {
            println!("Database version: {version}");
        }
        if let Some(required) = &config.require_base {
            println!("Configured require_base: {required}");
        }
        Ok(())
    }
}

fn base_or_dash<'a>(paths: impl Iterator<Item = &'a str>) -> String {
    root::resolve(paths).unwrap_or_else(|_| "-".to_string())
}
