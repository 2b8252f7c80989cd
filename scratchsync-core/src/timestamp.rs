//! Day-granularity timestamp normalization.
//!
//! Rhythmbox and Scratch LIVE record "added" times from different clocks and
//! at different moments of an import. Collapsing both sides to local
//! midnight makes them comparable and keeps Scratch LIVE's date sort stable.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::CoreError;

/// Round `timestamp` (epoch seconds) down to local midnight of its calendar
/// day, in the process's local time zone.
///
/// When midnight is ambiguous (clocks fall back across it) the earlier
/// instant wins; when midnight does not exist (clocks spring forward across
/// it) the first valid hour of the day is used. Either way the result lies
/// on the same local date, so rounding twice gives the same value.
pub fn round_to_day(timestamp: i64) -> Result<i64, CoreError> {
    let date = local_datetime(timestamp)?.date_naive();
    local_start_of_day(date)
        .map(|start| start.timestamp())
        .ok_or(CoreError::TimestampOutOfRange(timestamp))
}

/// Render `timestamp` as `YYYY-MM-DD HH:MM:SS` in local time.
///
/// Out-of-range values are rendered as the raw integer.
pub fn format_local(timestamp: i64) -> String {
    match local_datetime(timestamp) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

fn local_datetime(timestamp: i64) -> Result<DateTime<Local>, CoreError> {
    match Local.timestamp_opt(timestamp, 0) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(CoreError::TimestampOutOfRange(timestamp)),
    }
}

fn local_start_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    (0..24).find_map(|hour| {
        let naive: NaiveDateTime = date.and_hms_opt(hour, 0, 0)?;
        Local.from_local_datetime(&naive).earliest()
    })
}
