//! Source library loading: raw Rhythmbox records → root-relative [`SourceMap`].

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

use crate::error::CoreError;
use crate::root;
use crate::types::{SourceMap, SourceRecord};

/// URI prefix every visible song location must carry.
pub const LOCATION_PREFIX: &str = "file:///";

/// Fold `records` into a map from root-relative path to first-seen time.
///
/// Non-song and hidden records are skipped. A visible song whose location
/// lacks [`LOCATION_PREFIX`] aborts the whole load. After all records are
/// collected the shared root is stripped from every key; if two paths end
/// up with the same key the later one wins.
pub fn load<I>(records: I) -> Result<SourceMap, CoreError>
where
    I: IntoIterator<Item = SourceRecord>,
{
    let songs = visible_songs(records)?;
    let base = root::resolve(songs.iter().map(|(path, _)| path))?;
    tracing::debug!(source_base_dir = %base, songs = songs.len(), "found source base dir");

    Ok(songs
        .into_iter()
        .map(|(path, first_seen)| (root::relative(&path, &base).to_owned(), first_seen))
        .collect())
}

/// Absolute paths and first-seen times of the visible songs in `records`,
/// in order of first appearance. A path seen twice keeps its first position
/// and its last first-seen time.
pub fn visible_songs<I>(records: I) -> Result<Vec<(String, i64)>, CoreError>
where
    I: IntoIterator<Item = SourceRecord>,
{
    let mut songs: Vec<(String, i64)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        if !record.is_song || record.hidden {
            continue;
        }
        let path = absolute_path(&record.location)?;
        match positions.get(&path) {
            Some(&index) => {
                tracing::warn!(
                    path = %path,
                    previous = songs[index].1,
                    first_seen = record.first_seen,
                    "duplicate source path, keeping the later entry"
                );
                songs[index].1 = record.first_seen;
            }
            None => {
                positions.insert(path.clone(), songs.len());
                songs.push((path, record.first_seen));
            }
        }
    }
    Ok(songs)
}

/// `file:///music/a%20b.mp3` → `/music/a b.mp3`.
fn absolute_path(location: &str) -> Result<String, CoreError> {
    if !location.starts_with(LOCATION_PREFIX) {
        return Err(CoreError::MalformedRecord {
            location: location.to_owned(),
            expected: LOCATION_PREFIX,
        });
    }
    // Keep the leading '/' of the path component.
    let raw = &location[LOCATION_PREFIX.len() - 1..];
    Ok(percent_decode_str(raw).decode_utf8_lossy().into_owned())
}
