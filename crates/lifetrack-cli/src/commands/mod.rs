pub mod config;
pub mod layout;
pub mod multiplier;
pub mod report;
pub mod score;
pub mod streak;

use std::path::Path;

use chrono::NaiveDate;
use lifetrack_core::Interval;
use serde::Serialize;
use tracing::warn;

/// Read a JSON array of intervals.
///
/// Records that fail validation are kept; the engine treats an inverted
/// range as zero-length.
pub fn read_intervals(path: &Path) -> Result<Vec<Interval>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let intervals: Vec<Interval> = serde_json::from_str(&content)
        .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
    for interval in &intervals {
        if let Err(e) = interval.validate() {
            warn!(id = %interval.id, "{e}");
        }
    }
    Ok(intervals)
}

/// Read a single interval object.
pub fn read_interval(path: &Path) -> Result<Interval, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let interval: Interval = serde_json::from_str(&content)
        .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
    interval.validate()?;
    Ok(interval)
}

/// clap value parser for `YYYY-MM-DD`.
pub fn parse_day(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("'{value}': {e}"))
}

pub fn now_or(now: Option<i64>) -> i64 {
    now.unwrap_or_else(lifetrack_core::clock::now_ms)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
