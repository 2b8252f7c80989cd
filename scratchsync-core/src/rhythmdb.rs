//! Rhythmbox `rhythmdb.xml` reader.
//!
//! Only the handful of fields the loader needs are extracted from each
//! `<entry>`:
//!
//! ```text
//! <rhythmdb version="2.0">
//!   <entry type="song">
//!     <location>file:///music/Artist/track.mp3</location>
//!     <first-seen>1357401600</first-seen>
//!     <hidden>1</hidden>            (optional)
//!   </entry>
//! </rhythmdb>
//! ```

use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};

use crate::error::{io_err, CoreError};
use crate::types::SourceRecord;

/// `<home>/.local/share/rhythmbox/rhythmdb.xml`
pub fn default_path_at(home: &Path) -> PathBuf {
    home.join(".local")
        .join("share")
        .join("rhythmbox")
        .join("rhythmdb.xml")
}

/// Read and parse the Rhythmbox database at `path`.
pub fn read_at(path: &Path) -> Result<Vec<SourceRecord>, CoreError> {
    if !path.exists() {
        return Err(CoreError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    parse_document(&contents, path)
}

/// Parse Rhythmbox XML held in memory.
pub fn parse_str(xml: &str) -> Result<Vec<SourceRecord>, CoreError> {
    parse_document(xml, Path::new("<memory>"))
}

fn parse_document(xml: &str, path: &Path) -> Result<Vec<SourceRecord>, CoreError> {
    let doc = Document::parse(xml).map_err(|source| CoreError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    doc.root_element()
        .children()
        .filter(|node| node.has_tag_name("entry"))
        .enumerate()
        .map(|(index, node)| parse_entry(index, node))
        .collect()
}

fn parse_entry(index: usize, entry: Node<'_, '_>) -> Result<SourceRecord, CoreError> {
    let is_song = entry.attribute("type") == Some("song");
    let location = child_text(entry, "location");
    let hidden = child_text(entry, "hidden") == Some("1");
    let first_seen = child_text(entry, "first-seen");

    // Hidden songs and non-songs are skipped by the loader, so a missing or
    // garbled field there is not an error.
    if !is_song || hidden {
        return Ok(SourceRecord {
            is_song,
            location: location.unwrap_or_default().to_owned(),
            hidden,
            first_seen: first_seen.and_then(|t| t.parse().ok()).unwrap_or_default(),
        });
    }

    let location = location.ok_or_else(|| CoreError::InvalidRecord {
        index,
        reason: "song has no <location>".to_string(),
    })?;
    let first_seen = first_seen
        .ok_or_else(|| CoreError::InvalidRecord {
            index,
            reason: format!("song {location} has no <first-seen>"),
        })?
        .parse::<i64>()
        .map_err(|e| CoreError::InvalidRecord {
            index,
            reason: format!("song {location} has invalid <first-seen>: {e}"),
        })?;

    Ok(SourceRecord {
        is_song,
        location: location.to_owned(),
        hidden,
        first_seen,
    })
}

fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|child| child.has_tag_name(tag))
        .and_then(|child| child.text())
        .map(str::trim)
}
