use crate::db::decimal_col;
use crate::errors::AppResult;
use crate::models::user::User;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        user_id: row.get("user_id")?,
        chat_id: row.get("chat_id")?,
        username: row.get("username")?,
        full_name: row.get("full_name")?,
        base_salary: decimal_col(row, "base_salary")?,
        active: row.get::<_, i32>("is_active")? == 1,
    })
}

/// Register or refresh a user; re-registering reactivates a terminated row.
pub fn upsert_user(
    conn: &Connection,
    user_id: i64,
    chat_id: i64,
    username: &str,
    full_name: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (user_id, chat_id, username, full_name)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (user_id, chat_id) DO UPDATE
         SET username = excluded.username,
             full_name = excluded.full_name,
             is_active = 1",
        params![user_id, chat_id, username, full_name],
    )?;
    Ok(())
}

pub fn find_user(conn: &Connection, user_id: i64, chat_id: i64) -> AppResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT * FROM users WHERE user_id = ?1 AND chat_id = ?2",
            params![user_id, chat_id],
            map_user,
        )
        .optional()?;
    Ok(user)
}

/// Lookup by chat handle, with or without the leading '@'.
pub fn find_by_handle(conn: &Connection, chat_id: i64, handle: &str) -> AppResult<Option<User>> {
    let handle = handle.trim().trim_start_matches('@');
    let user = conn
        .query_row(
            "SELECT * FROM users WHERE chat_id = ?1 AND username = ?2 COLLATE NOCASE",
            params![chat_id, handle],
            map_user,
        )
        .optional()?;
    Ok(user)
}

/// Returns the number of rows touched (0 when the user is unknown).
pub fn set_active(conn: &Connection, user_id: i64, chat_id: i64, active: bool) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE users SET is_active = ?1 WHERE user_id = ?2 AND chat_id = ?3",
        params![if active { 1 } else { 0 }, user_id, chat_id],
    )?;
    Ok(n)
}

pub fn set_salary(conn: &Connection, user_id: i64, chat_id: i64, amount: Decimal) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE users SET base_salary = ?1 WHERE user_id = ?2 AND chat_id = ?3",
        params![amount.to_string(), user_id, chat_id],
    )?;
    Ok(n)
}

pub fn active_users(conn: &Connection, chat_id: i64) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM users
         WHERE chat_id = ?1 AND is_active = 1
         ORDER BY user_id ASC",
    )?;
    let rows = stmt.query_map([chat_id], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
