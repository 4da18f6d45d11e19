use crate::db::{conversion_err, is_unique_violation, opt_ts_col, ts_col};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceRecord, DayReportLine};
use crate::models::payroll::MonthlyStats;
use crate::utils::time::to_db;
use chrono::{DateTime, FixedOffset, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_record(row: &Row) -> rusqlite::Result<AttendanceRecord> {
    let date_str: String = row.get("work_date")?;
    let work_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_err(AppError::Other(format!("bad work_date: {date_str}"))))?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        chat_id: row.get("chat_id")?,
        work_date,
        check_in: ts_col(row, "check_in")?,
        check_out: opt_ts_col(row, "check_out")?,
        late_mins: row.get("late_mins")?,
    })
}

/// Insert the day's record. A duplicate for the same date is `AlreadyCheckedIn`.
pub fn insert_check_in(
    conn: &Connection,
    user_id: i64,
    chat_id: i64,
    work_date: NaiveDate,
    check_in: &DateTime<FixedOffset>,
    late_mins: i64,
) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO attendance (user_id, chat_id, work_date, check_in, late_mins)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user_id,
            chat_id,
            work_date.format("%Y-%m-%d").to_string(),
            to_db(check_in),
            late_mins
        ],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(AppError::AlreadyCheckedIn(work_date)),
        Err(e) => Err(e.into()),
    }
}

/// Returns the number of rows updated (0 when there is no record for the day).
pub fn set_check_out(
    conn: &Connection,
    user_id: i64,
    chat_id: i64,
    work_date: NaiveDate,
    check_out: &DateTime<FixedOffset>,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE attendance SET check_out = ?1
         WHERE user_id = ?2 AND chat_id = ?3 AND work_date = ?4",
        params![
            to_db(check_out),
            user_id,
            chat_id,
            work_date.format("%Y-%m-%d").to_string()
        ],
    )?;
    Ok(n)
}

pub fn find_record(
    conn: &Connection,
    user_id: i64,
    chat_id: i64,
    work_date: NaiveDate,
) -> AppResult<Option<AttendanceRecord>> {
    let rec = conn
        .query_row(
            "SELECT * FROM attendance
             WHERE user_id = ?1 AND chat_id = ?2 AND work_date = ?3",
            params![user_id, chat_id, work_date.format("%Y-%m-%d").to_string()],
            map_record,
        )
        .optional()?;
    Ok(rec)
}

/// True when the user has checked in on `work_date` in any workspace.
pub fn checked_in_anywhere(conn: &Connection, user_id: i64, work_date: NaiveDate) -> AppResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM attendance WHERE user_id = ?1 AND work_date = ?2 LIMIT 1",
            params![user_id, work_date.format("%Y-%m-%d").to_string()],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// (distinct work days, total lateness) for a `YYYY-MM` month.
pub fn month_totals(
    conn: &Connection,
    user_id: i64,
    chat_id: i64,
    month_key: &str,
) -> AppResult<MonthlyStats> {
    let (days, late): (i64, Option<i64>) = conn.query_row(
        "SELECT COUNT(DISTINCT work_date), SUM(late_mins)
         FROM attendance
         WHERE user_id = ?1 AND chat_id = ?2 AND substr(work_date, 1, 7) = ?3",
        params![user_id, chat_id, month_key],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(MonthlyStats {
        work_days: days,
        late_minutes: late.unwrap_or(0),
        approved_leaves: 0,
    })
}

/// Every record of a workspace for one date, with the employee's name.
pub fn day_report(conn: &Connection, chat_id: i64, work_date: NaiveDate) -> AppResult<Vec<DayReportLine>> {
    let mut stmt = conn.prepare(
        "SELECT a.user_id, COALESCE(u.full_name, CAST(a.user_id AS TEXT)) AS full_name,
                a.check_in, a.check_out, a.late_mins
         FROM attendance a
         LEFT JOIN users u ON u.user_id = a.user_id AND u.chat_id = a.chat_id
         WHERE a.chat_id = ?1 AND a.work_date = ?2
         ORDER BY a.check_in ASC",
    )?;

    let rows = stmt.query_map(
        params![chat_id, work_date.format("%Y-%m-%d").to_string()],
        |row| {
            Ok(DayReportLine {
                user_id: row.get("user_id")?,
                full_name: row.get("full_name")?,
                check_in: ts_col(row, "check_in")?,
                check_out: opt_ts_col(row, "check_out")?,
                late_mins: row.get("late_mins")?,
            })
        },
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
