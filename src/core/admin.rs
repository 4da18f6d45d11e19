use crate::core::payroll::PayrollAggregator;
use crate::core::roles::RoleResolver;
use crate::core::{Caller, Target};
use crate::db::{admins, attendance, log, settings, users};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::DayReportLine;
use crate::models::break_kind::BreakKind;
use crate::models::payroll::PayrollLine;
use crate::models::role::Role;
use crate::utils::date::{parse_date, weekday_from_name, weekday_full_name};
use crate::utils::time::parse_time;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

const MAX_GRANT_DAYS: i64 = 3650;

#[derive(Debug, Clone)]
pub struct DayReport {
    pub date: NaiveDate,
    pub rest_day: bool,
    pub lines: Vec<DayReportLine>,
}

/// Workspace administration. Every operation requires owner or admin,
/// `grant_admin` requires the owner.
#[derive(Debug, Clone, Copy)]
pub struct AdminLogic {
    roles: RoleResolver,
}

impl AdminLogic {
    pub fn new(roles: RoleResolver) -> Self {
        Self { roles }
    }

    fn role(&self, conn: &Connection, caller: Caller, now: DateTime<FixedOffset>) -> AppResult<Role> {
        self.roles
            .resolve(conn, caller.user_id, caller.chat_id, now.with_timezone(&Utc))
    }

    pub fn set_work_hours(
        &self,
        conn: &Connection,
        caller: Caller,
        hours: &str,
        now: DateTime<FixedOffset>,
    ) -> AppResult<String> {
        self.role(conn, caller, now)?.require_admin()?;
        let normalized = normalize_work_hours(hours)?;
        settings::set_work_hours(conn, caller.chat_id, &normalized)?;
        log::audit(conn, "set_work", &caller.to_string(), &normalized);
        Ok(normalized)
    }

    pub fn set_off_days(
        &self,
        conn: &Connection,
        caller: Caller,
        days: &str,
        now: DateTime<FixedOffset>,
    ) -> AppResult<String> {
        self.role(conn, caller, now)?.require_admin()?;
        let normalized = normalize_off_days(days)?;
        settings::set_off_days(conn, caller.chat_id, &normalized)?;
        log::audit(conn, "set_off", &caller.to_string(), &normalized);
        Ok(normalized)
    }

    pub fn set_salary(
        &self,
        conn: &Connection,
        caller: Caller,
        target: &Target,
        amount: &str,
        now: DateTime<FixedOffset>,
    ) -> AppResult<Decimal> {
        self.role(conn, caller, now)?.require_admin()?;
        let amount = parse_amount(amount)?;
        let user = target.lookup(conn, caller.chat_id)?;
        users::set_salary(conn, user.user_id, caller.chat_id, amount)?;
        log::audit(
            conn,
            "set_salary",
            &caller.to_string(),
            &format!("{} → {}", user.mention(), amount),
        );
        Ok(amount)
    }

    pub fn set_bonus(
        &self,
        conn: &Connection,
        caller: Caller,
        amount: &str,
        now: DateTime<FixedOffset>,
    ) -> AppResult<Decimal> {
        self.role(conn, caller, now)?.require_admin()?;
        let amount = parse_amount(amount)?;
        settings::set_bonus(conn, caller.chat_id, amount)?;
        log::audit(conn, "set_bonus", &caller.to_string(), &amount.to_string());
        Ok(amount)
    }

    pub fn set_break_limit(
        &self,
        conn: &Connection,
        caller: Caller,
        kind: BreakKind,
        minutes: i64,
        now: DateTime<FixedOffset>,
    ) -> AppResult<()> {
        self.role(conn, caller, now)?.require_admin()?;
        if minutes <= 0 {
            return Err(AppError::Validation(format!(
                "break limit must be a positive number of minutes, got {minutes}"
            )));
        }
        settings::set_limit(conn, caller.chat_id, kind, minutes)?;
        log::audit(
            conn,
            "set_limit",
            &caller.to_string(),
            &format!("{} = {} min", kind.to_db_str(), minutes),
        );
        Ok(())
    }

    /// Terminate an employee. The row is kept with `is_active = 0`.
    pub fn fire(
        &self,
        conn: &Connection,
        caller: Caller,
        target: &Target,
        now: DateTime<FixedOffset>,
    ) -> AppResult<String> {
        self.role(conn, caller, now)?.require_admin()?;
        let user = target.lookup(conn, caller.chat_id)?;
        users::set_active(conn, user.user_id, caller.chat_id, false)?;
        log::audit(conn, "fire", &caller.to_string(), &user.mention());
        tracing::info!(chat = caller.chat_id, user = user.user_id, "employee terminated");
        Ok(user.full_name)
    }

    /// Grant or renew admin rights for `days` from `now`. Owner only.
    pub fn grant_admin(
        &self,
        conn: &Connection,
        caller: Caller,
        target: &Target,
        days: i64,
        now: DateTime<FixedOffset>,
    ) -> AppResult<DateTime<Utc>> {
        self.role(conn, caller, now)?.require_owner()?;
        if !(1..=MAX_GRANT_DAYS).contains(&days) {
            return Err(AppError::Validation(format!(
                "days must be between 1 and {MAX_GRANT_DAYS}, got {days}"
            )));
        }

        let user_id = match target {
            Target::Id(id) => *id,
            Target::Handle(_) => target.lookup(conn, caller.chat_id)?.user_id,
        };

        let expires_at = now.with_timezone(&Utc) + Duration::days(days);
        admins::upsert_grant(conn, user_id, expires_at)?;
        log::audit(
            conn,
            "set_admin",
            &caller.to_string(),
            &format!("{user_id} until {}", expires_at.to_rfc3339()),
        );
        Ok(expires_at)
    }

    pub fn report_day(
        &self,
        conn: &Connection,
        caller: Caller,
        date: NaiveDate,
        now: DateTime<FixedOffset>,
    ) -> AppResult<DayReport> {
        self.role(conn, caller, now)?.require_admin()?;
        let ws = settings::load_settings(conn, caller.chat_id)?;
        Ok(DayReport {
            date,
            rest_day: ws.is_rest_day(date),
            lines: attendance::day_report(conn, caller.chat_id, date)?,
        })
    }

    pub fn report_month(
        &self,
        conn: &Connection,
        caller: Caller,
        month: u32,
        year: i32,
        now: DateTime<FixedOffset>,
    ) -> AppResult<Vec<PayrollLine>> {
        self.role(conn, caller, now)?.require_admin()?;
        PayrollAggregator::settle_month(conn, caller.chat_id, month, year)
    }
}

pub fn parse_amount(raw: &str) -> AppResult<Decimal> {
    let amount = Decimal::from_str(raw.trim().replace(',', "").as_str())
        .map_err(|_| AppError::Validation(format!("'{raw}' is not an amount")))?;
    if amount.is_sign_negative() {
        return Err(AppError::Validation("amount cannot be negative".into()));
    }
    Ok(amount)
}

/// `HH:MM-HH:MM[,HH:MM-HH:MM...]`, each shift ending after it starts.
pub fn normalize_work_hours(raw: &str) -> AppResult<String> {
    let bad = || AppError::Validation(format!("work hours must look like 08:00-17:00, got '{raw}'"));

    let mut shifts = Vec::new();
    for segment in raw.split(',') {
        let (start, end) = segment.split_once(['-', '–']).ok_or_else(bad)?;
        let start = parse_time(start).ok_or_else(bad)?;
        let end = parse_time(end).ok_or_else(bad)?;
        if end <= start {
            return Err(bad());
        }
        shifts.push(format!("{}-{}", start.format("%H:%M"), end.format("%H:%M")));
    }
    Ok(shifts.join(","))
}

/// Weekday names and/or `YYYY-MM-DD` dates; `none` clears the list.
pub fn normalize_off_days(raw: &str) -> AppResult<String> {
    if raw.trim().eq_ignore_ascii_case("none") {
        return Ok(String::new());
    }

    let mut out = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if let Some(d) = parse_date(token) {
            out.push(d.format("%Y-%m-%d").to_string());
        } else if let Some(w) = weekday_from_name(token) {
            out.push(weekday_full_name(w).to_string());
        } else {
            return Err(AppError::Validation(format!(
                "'{token}' is neither a weekday nor a YYYY-MM-DD date"
            )));
        }
    }

    if out.is_empty() {
        return Err(AppError::Validation("no rest days given".into()));
    }
    Ok(out.join(","))
}
