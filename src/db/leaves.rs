use crate::db::{conversion_err, ts_col};
use crate::errors::{AppError, AppResult};
use crate::models::leave::{LeaveRequest, LeaveStatus};
use crate::utils::time::to_db;
use chrono::{DateTime, FixedOffset};
use rusqlite::{Connection, Row, params};

fn map_leave(row: &Row) -> rusqlite::Result<LeaveRequest> {
    let status: String = row.get("status")?;
    Ok(LeaveRequest {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        chat_id: row.get("chat_id")?,
        kind: row.get("kind")?,
        reason: row.get("reason")?,
        submitted_at: ts_col(row, "timestamp")?,
        status: LeaveStatus::from_db_str(&status)
            .ok_or_else(|| conversion_err(AppError::Other(format!("bad leave status: {status}"))))?,
    })
}

pub fn insert_leave(
    conn: &Connection,
    user_id: i64,
    chat_id: i64,
    kind: &str,
    reason: &str,
    submitted_at: &DateTime<FixedOffset>,
    status: LeaveStatus,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO leave_requests (user_id, chat_id, kind, reason, timestamp, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user_id,
            chat_id,
            kind,
            reason,
            to_db(submitted_at),
            status.to_db_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Approved requests submitted in a `YYYY-MM` month.
pub fn approved_in_month(conn: &Connection, user_id: i64, chat_id: i64, month_key: &str) -> AppResult<i64> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM leave_requests
         WHERE user_id = ?1 AND chat_id = ?2 AND status = ?3
           AND substr(timestamp, 1, 7) = ?4",
        params![user_id, chat_id, LeaveStatus::Approved.to_db_str(), month_key],
        |row| row.get(0),
    )?;
    Ok(n)
}

pub fn leaves_for_user(conn: &Connection, user_id: i64, chat_id: i64) -> AppResult<Vec<LeaveRequest>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM leave_requests
         WHERE user_id = ?1 AND chat_id = ?2
         ORDER BY timestamp DESC",
    )?;
    let rows = stmt.query_map(params![user_id, chat_id], map_leave)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
