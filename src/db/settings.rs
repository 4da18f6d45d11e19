use crate::db::decimal_col;
use crate::errors::AppResult;
use crate::models::break_kind::BreakKind;
use crate::models::settings::WorkspaceSettings;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

fn map_settings(row: &Row) -> rusqlite::Result<WorkspaceSettings> {
    Ok(WorkspaceSettings {
        chat_id: row.get("chat_id")?,
        off_days: row.get("off_days")?,
        bonus: decimal_col(row, "bonus")?,
        toilet_limit: row.get("toilet_limit")?,
        smoke_limit: row.get("smoke_limit")?,
        work_hours: row.get("work_hours")?,
    })
}

/// Settings of a workspace, or the defaults when it has no row yet.
pub fn load_settings(conn: &Connection, chat_id: i64) -> AppResult<WorkspaceSettings> {
    let found = conn
        .query_row(
            "SELECT * FROM chat_settings WHERE chat_id = ?1",
            [chat_id],
            map_settings,
        )
        .optional()?;
    Ok(found.unwrap_or_else(|| WorkspaceSettings::defaults(chat_id)))
}

fn ensure_row(conn: &Connection, chat_id: i64) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO chat_settings (chat_id) VALUES (?1)",
        [chat_id],
    )?;
    Ok(())
}

pub fn set_work_hours(conn: &Connection, chat_id: i64, hours: &str) -> AppResult<()> {
    ensure_row(conn, chat_id)?;
    conn.execute(
        "UPDATE chat_settings SET work_hours = ?1 WHERE chat_id = ?2",
        params![hours, chat_id],
    )?;
    Ok(())
}

pub fn set_off_days(conn: &Connection, chat_id: i64, off_days: &str) -> AppResult<()> {
    ensure_row(conn, chat_id)?;
    conn.execute(
        "UPDATE chat_settings SET off_days = ?1 WHERE chat_id = ?2",
        params![off_days, chat_id],
    )?;
    Ok(())
}

pub fn set_bonus(conn: &Connection, chat_id: i64, bonus: Decimal) -> AppResult<()> {
    ensure_row(conn, chat_id)?;
    conn.execute(
        "UPDATE chat_settings SET bonus = ?1 WHERE chat_id = ?2",
        params![bonus.to_string(), chat_id],
    )?;
    Ok(())
}

pub fn set_limit(conn: &Connection, chat_id: i64, kind: BreakKind, minutes: i64) -> AppResult<()> {
    ensure_row(conn, chat_id)?;
    // Column name comes from a closed enum, never from input.
    let sql = format!(
        "UPDATE chat_settings SET {} = ?1 WHERE chat_id = ?2",
        kind.limit_column()
    );
    conn.execute(&sql, params![minutes, chat_id])?;
    Ok(())
}

/// Every workspace the store knows about: configured ones and those with users.
pub fn known_workspaces(conn: &Connection) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT chat_id FROM chat_settings
         UNION
         SELECT chat_id FROM users
         ORDER BY 1",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
