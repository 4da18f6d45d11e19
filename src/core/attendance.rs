use crate::core::Caller;
use crate::core::clock::Clock;
use crate::core::roles::RoleResolver;
use crate::db::{attendance, log, settings};
use crate::errors::AppResult;
use crate::models::attendance::{CheckInReceipt, CheckOutOutcome};
use crate::utils::time::{format_hhmm, late_minutes, truncate_to_minute};
use chrono::{DateTime, FixedOffset, Utc};
use rusqlite::Connection;

/// Daily check-in / check-out ledger.
#[derive(Debug, Clone, Copy)]
pub struct AttendanceLedger {
    roles: RoleResolver,
    clock: Clock,
}

impl AttendanceLedger {
    pub fn new(roles: RoleResolver, clock: Clock) -> Self {
        Self { roles, clock }
    }

    /// Record today's arrival and its lateness against the scheduled start.
    ///
    /// `now` is truncated to the minute before it is stored or compared, so
    /// 08:07:30 against an 08:00 start is 7 minutes late. A second call on
    /// the same date fails with `AlreadyCheckedIn` and writes nothing.
    pub fn check_in(
        &self,
        conn: &Connection,
        caller: Caller,
        now: DateTime<FixedOffset>,
    ) -> AppResult<CheckInReceipt> {
        let now = truncate_to_minute(self.clock.localize(now));
        self.roles
            .resolve(conn, caller.user_id, caller.chat_id, now.with_timezone(&Utc))?
            .require_active()?;

        let ws = settings::load_settings(conn, caller.chat_id)?;
        let late = late_minutes(ws.start_time(), now.time());
        let work_date = now.date_naive();

        attendance::insert_check_in(conn, caller.user_id, caller.chat_id, work_date, &now, late)?;

        log::audit(
            conn,
            "check_in",
            &caller.to_string(),
            &format!("checked in at {} ({} min late)", format_hhmm(&now), late),
        );
        tracing::info!(user = caller.user_id, chat = caller.chat_id, late, "check-in recorded");

        Ok(CheckInReceipt {
            checked_in_at: now,
            late_mins: late,
            rest_day: ws.is_rest_day(work_date),
        })
    }

    /// Stamp the check-out on today's record. Without a record nothing is written.
    pub fn check_out(
        &self,
        conn: &Connection,
        caller: Caller,
        now: DateTime<FixedOffset>,
    ) -> AppResult<CheckOutOutcome> {
        let now = truncate_to_minute(self.clock.localize(now));
        self.roles
            .resolve(conn, caller.user_id, caller.chat_id, now.with_timezone(&Utc))?
            .require_active()?;

        let updated =
            attendance::set_check_out(conn, caller.user_id, caller.chat_id, now.date_naive(), &now)?;

        if updated == 0 {
            tracing::debug!(user = caller.user_id, chat = caller.chat_id, "check-out without check-in ignored");
            return Ok(CheckOutOutcome::NothingToClose);
        }

        log::audit(
            conn,
            "check_out",
            &caller.to_string(),
            &format!("checked out at {}", format_hhmm(&now)),
        );
        Ok(CheckOutOutcome::Recorded)
    }
}
