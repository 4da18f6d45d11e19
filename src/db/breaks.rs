use crate::db::{conversion_err, is_unique_violation, opt_ts_col, ts_col};
use crate::errors::{AppError, AppResult};
use crate::models::break_interval::{BreakInterval, OpenBreak};
use crate::models::break_kind::BreakKind;
use crate::utils::time::to_db;
use chrono::{DateTime, FixedOffset};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn kind_col(row: &Row) -> rusqlite::Result<BreakKind> {
    let raw: String = row.get("type")?;
    BreakKind::from_db_str(&raw)
        .ok_or_else(|| conversion_err(AppError::Other(format!("unknown break type: {raw}"))))
}

fn map_interval(row: &Row) -> rusqlite::Result<BreakInterval> {
    Ok(BreakInterval {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        chat_id: row.get("chat_id")?,
        kind: kind_col(row)?,
        start_at: ts_col(row, "start_at")?,
        end_at: opt_ts_col(row, "end_at")?,
    })
}

/// The running interval of `kind` for a user, if any.
pub fn find_open(conn: &Connection, user_id: i64, kind: BreakKind) -> AppResult<Option<BreakInterval>> {
    let found = conn
        .query_row(
            "SELECT * FROM activity_logs
             WHERE user_id = ?1 AND type = ?2 AND end_at IS NULL",
            params![user_id, kind.to_db_str()],
            map_interval,
        )
        .optional()?;
    Ok(found)
}

pub fn open_interval(
    conn: &Connection,
    user_id: i64,
    chat_id: i64,
    kind: BreakKind,
    start_at: &DateTime<FixedOffset>,
) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO activity_logs (user_id, chat_id, type, start_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![user_id, chat_id, kind.to_db_str(), to_db(start_at)],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(AppError::Other(format!(
            "a {} break is already running for user {user_id}",
            kind.to_db_str()
        ))),
        Err(e) => Err(e.into()),
    }
}

pub fn close_interval(conn: &Connection, id: i64, end_at: &DateTime<FixedOffset>) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE activity_logs SET end_at = ?1 WHERE id = ?2 AND end_at IS NULL",
        params![to_db(end_at), id],
    )?;
    Ok(n)
}

pub fn find_interval(conn: &Connection, id: i64) -> AppResult<Option<BreakInterval>> {
    let found = conn
        .query_row(
            "SELECT * FROM activity_logs WHERE id = ?1",
            [id],
            map_interval,
        )
        .optional()?;
    Ok(found)
}

/// Running intervals of one user inside a workspace.
pub fn open_for_user(conn: &Connection, user_id: i64, chat_id: i64) -> AppResult<Vec<BreakInterval>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM activity_logs
         WHERE user_id = ?1 AND chat_id = ?2 AND end_at IS NULL
         ORDER BY start_at ASC",
    )?;
    let rows = stmt.query_map(params![user_id, chat_id], map_interval)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every running interval of a workspace joined to its owner's handle.
pub fn open_in_workspace(conn: &Connection, chat_id: i64) -> AppResult<Vec<OpenBreak>> {
    let mut stmt = conn.prepare(
        "SELECT l.user_id, COALESCE(NULLIF(u.username, ''), CAST(l.user_id AS TEXT)) AS handle,
                l.type, l.start_at
         FROM activity_logs l
         LEFT JOIN users u ON u.user_id = l.user_id AND u.chat_id = l.chat_id
         WHERE l.chat_id = ?1 AND l.end_at IS NULL
         ORDER BY l.start_at ASC",
    )?;

    let rows = stmt.query_map([chat_id], |row| {
        Ok(OpenBreak {
            user_id: row.get("user_id")?,
            handle: row.get("handle")?,
            kind: kind_col(row)?,
            start_at: ts_col(row, "start_at")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
