use chrono::{DateTime, FixedOffset};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeaveStatus {
    Approved,
    Pending,
    Rejected,
}

impl LeaveStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Rejected => "REJECTED",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "APPROVED" => Some(LeaveStatus::Approved),
            "PENDING" => Some(LeaveStatus::Pending),
            "REJECTED" => Some(LeaveStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaveRequest {
    pub id: i64,
    pub user_id: i64,
    pub chat_id: i64,
    pub kind: String, // free-form: sick, personal, ...
    pub reason: String,
    pub submitted_at: DateTime<FixedOffset>,
    pub status: LeaveStatus,
}
