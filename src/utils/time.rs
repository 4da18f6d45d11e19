//! Time utilities: parsing HH:MM, minute truncation, stored timestamps.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, TimeZone, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Drop seconds and sub-second precision.
pub fn truncate_to_minute(ts: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

/// Whole minutes from `start` to `end` (floor), never negative.
pub fn late_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    if end <= start {
        return 0;
    }
    (end - start).num_seconds().div_euclid(60)
}

/// Fractional minutes elapsed between two instants.
pub fn elapsed_minutes(from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> f64 {
    (to - from).num_milliseconds() as f64 / 60_000.0
}

pub fn format_hhmm(ts: &DateTime<FixedOffset>) -> String {
    ts.format("%H:%M").to_string()
}

pub fn to_db(ts: &DateTime<FixedOffset>) -> String {
    ts.to_rfc3339()
}

pub fn from_db(s: &str) -> AppResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).map_err(|_| AppError::Other(format!("bad timestamp: {s}")))
}

/// Parse `YYYY-MM-DD HH:MM[:SS]` as wall-clock time in `offset`.
pub fn parse_local_datetime(s: &str, offset: FixedOffset) -> AppResult<DateTime<FixedOffset>> {
    let s = s.trim();
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .map_err(|_| AppError::Validation(format!("invalid date-time '{s}'")))?;
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| AppError::Validation(format!("invalid date-time '{s}'")))
}
