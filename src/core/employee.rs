use crate::core::Caller;
use crate::core::clock::Clock;
use crate::core::roles::RoleResolver;
use crate::db::{attendance, breaks, leaves, log, users};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::break_interval::BreakInterval;
use crate::models::leave::{LeaveRequest, LeaveStatus};
use crate::models::role::Role;
use chrono::{DateTime, FixedOffset, Utc};
use rusqlite::Connection;

/// Snapshot returned by `status`.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub role: Role,
    pub today: Option<AttendanceRecord>,
    pub open_breaks: Vec<BreakInterval>,
}

/// Self-service operations of an employee.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeLogic {
    roles: RoleResolver,
    clock: Clock,
}

impl EmployeeLogic {
    pub fn new(roles: RoleResolver, clock: Clock) -> Self {
        Self { roles, clock }
    }

    pub fn register(&self, conn: &Connection, caller: Caller, handle: &str, full_name: &str) -> AppResult<()> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AppError::Validation("a full name is required".into()));
        }
        let handle = handle.trim().trim_start_matches('@');
        let handle = if handle.is_empty() {
            caller.user_id.to_string()
        } else {
            handle.to_string()
        };

        users::upsert_user(conn, caller.user_id, caller.chat_id, &handle, full_name)?;
        log::audit(conn, "register", &caller.to_string(), full_name);
        Ok(())
    }

    pub fn resign(&self, conn: &Connection, caller: Caller, now: DateTime<FixedOffset>) -> AppResult<()> {
        self.roles
            .resolve(conn, caller.user_id, caller.chat_id, now.with_timezone(&Utc))?
            .require_active()?;

        if users::set_active(conn, caller.user_id, caller.chat_id, false)? == 0 {
            return Err(AppError::NotRegistered);
        }
        log::audit(conn, "resign", &caller.to_string(), "resigned");
        Ok(())
    }

    /// Leave is approved on submission; there is no review step.
    pub fn request_leave(
        &self,
        conn: &Connection,
        caller: Caller,
        kind: &str,
        reason: &str,
        now: DateTime<FixedOffset>,
    ) -> AppResult<LeaveRequest> {
        let now = self.clock.localize(now);
        self.roles
            .resolve(conn, caller.user_id, caller.chat_id, now.with_timezone(&Utc))?
            .require_active()?;

        let kind = kind.trim().to_lowercase();
        if kind.is_empty() {
            return Err(AppError::Validation("a leave type is required (sick, personal, ...)".into()));
        }

        let status = LeaveStatus::Approved;
        let id = leaves::insert_leave(conn, caller.user_id, caller.chat_id, &kind, reason.trim(), &now, status)?;
        log::audit(conn, "leave", &caller.to_string(), &format!("{kind}: {}", reason.trim()));

        Ok(LeaveRequest {
            id,
            user_id: caller.user_id,
            chat_id: caller.chat_id,
            kind,
            reason: reason.trim().to_string(),
            submitted_at: now,
            status,
        })
    }

    pub fn status(&self, conn: &Connection, caller: Caller, now: DateTime<FixedOffset>) -> AppResult<StatusReport> {
        let now = self.clock.localize(now);
        let role = self
            .roles
            .resolve(conn, caller.user_id, caller.chat_id, now.with_timezone(&Utc))?
            .require_active()?;

        Ok(StatusReport {
            role,
            today: attendance::find_record(conn, caller.user_id, caller.chat_id, now.date_naive())?,
            open_breaks: breaks::open_for_user(conn, caller.user_id, caller.chat_id)?,
        })
    }
}
