use std::collections::HashSet;

use chrono::{Local, NaiveDate, TimeZone};

use crate::error::{BusFactorError, Result};

/// Convert epoch milliseconds to a calendar date in the local time zone.
pub fn to_local_date(timestamp_ms: i64) -> Result<NaiveDate> {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .earliest()
        .map(|dt| dt.date_naive())
        .ok_or(BusFactorError::InvalidTimestamp(timestamp_ms))
}

/// Whole days from `earlier` to `later`. Negative when `earlier` is after `later`.
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Extension of the last path component, without the dot.
pub fn extension(path: &str) -> Option<&str> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let dot = file_name.rfind('.')?;
    Some(&file_name[dot + 1..])
}

/// A path is valid unless its extension is in the ignore set.
/// Paths without an extension are always valid.
pub fn is_valid_file_path(path: &str, ignore_extensions: &HashSet<String>) -> bool {
    match extension(path) {
        Some(ext) => !ignore_extensions.contains(ext),
        None => true,
    }
}

/// Round to four decimals for display.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
#[path = "util_test.rs"]
mod tests;
