use super::break_kind::BreakKind;
use crate::utils::time::parse_time;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

pub const DEFAULT_WORK_HOURS: &str = "08:00-17:00";
pub const DEFAULT_OFF_DAYS: &str = "Sunday";

/// Per-workspace policy. A workspace without a `chat_settings` row
/// behaves as `WorkspaceSettings::defaults(chat_id)`.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceSettings {
    pub chat_id: i64,
    pub off_days: String, // comma-separated weekday names and/or YYYY-MM-DD dates
    pub bonus: Decimal,
    pub toilet_limit: i64,
    pub smoke_limit: i64,
    pub work_hours: String,
}

impl WorkspaceSettings {
    pub fn defaults(chat_id: i64) -> Self {
        Self {
            chat_id,
            off_days: DEFAULT_OFF_DAYS.to_string(),
            bonus: Decimal::ZERO,
            toilet_limit: BreakKind::Toilet.default_limit(),
            smoke_limit: BreakKind::Smoke.default_limit(),
            work_hours: DEFAULT_WORK_HOURS.to_string(),
        }
    }

    pub fn limit_for(&self, kind: BreakKind) -> i64 {
        match kind {
            BreakKind::Toilet => self.toilet_limit,
            BreakKind::Smoke => self.smoke_limit,
        }
    }

    /// Scheduled start: the first `HH:MM` before any ',' or '-'.
    pub fn start_time(&self) -> NaiveTime {
        scheduled_start(&self.work_hours)
    }

    /// True when `date` is listed by weekday name (e.g. `Sunday`) or as `YYYY-MM-DD`.
    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        let day_name = date.format("%A").to_string();
        let date_str = date.format("%Y-%m-%d").to_string();
        self.off_days
            .split(',')
            .map(str::trim)
            .any(|d| d.eq_ignore_ascii_case(&day_name) || d == date_str)
    }
}

fn default_start() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN)
}

pub fn scheduled_start(work_hours: &str) -> NaiveTime {
    let first = work_hours
        .split(',')
        .next()
        .unwrap_or_default()
        .split(['-', '–'])
        .next()
        .unwrap_or_default()
        .trim();

    if first.is_empty() {
        return default_start();
    }

    match parse_time(first) {
        Some(t) => t,
        None => {
            tracing::warn!(work_hours, "unparsable work hours, using 08:00");
            default_start()
        }
    }
}
