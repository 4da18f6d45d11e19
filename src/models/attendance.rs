use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

/// One row per (user, workspace, work date).
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub user_id: i64,
    pub chat_id: i64,
    pub work_date: NaiveDate,
    pub check_in: DateTime<FixedOffset>,
    pub check_out: Option<DateTime<FixedOffset>>,
    pub late_mins: i64,
}

/// What a successful check-in reports back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInReceipt {
    pub checked_in_at: DateTime<FixedOffset>,
    pub late_mins: i64,
    pub rest_day: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutOutcome {
    Recorded,
    /// No check-in exists for today; nothing was written.
    NothingToClose,
}

/// Row of the daily workspace report.
#[derive(Debug, Clone, Serialize)]
pub struct DayReportLine {
    pub user_id: i64,
    pub full_name: String,
    pub check_in: DateTime<FixedOffset>,
    pub check_out: Option<DateTime<FixedOffset>>,
    pub late_mins: i64,
}
