use super::break_kind::BreakKind;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BreakInterval {
    pub id: i64,
    pub user_id: i64,
    pub chat_id: i64,
    pub kind: BreakKind,
    pub start_at: DateTime<FixedOffset>,
    pub end_at: Option<DateTime<FixedOffset>>, // None while the break is running
}

impl BreakInterval {
    pub fn is_open(&self) -> bool {
        self.end_at.is_none()
    }
}

/// Open interval joined with its owner's handle, as seen by the scanner.
#[derive(Debug, Clone)]
pub struct OpenBreak {
    pub user_id: i64,
    pub handle: String,
    pub kind: BreakKind,
    pub start_at: DateTime<FixedOffset>,
}
