use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

/// Grant or renew admin rights until `expires_at`.
pub fn upsert_grant(conn: &Connection, user_id: i64, expires_at: DateTime<Utc>) -> AppResult<()> {
    conn.execute(
        "INSERT INTO admins (user_id, expire_date) VALUES (?1, ?2)
         ON CONFLICT (user_id) DO UPDATE SET expire_date = excluded.expire_date",
        params![user_id, expires_at.to_rfc3339()],
    )?;
    Ok(())
}

pub fn grant_expiry(conn: &Connection, user_id: i64) -> AppResult<Option<DateTime<Utc>>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT expire_date FROM admins WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )
        .optional()?;

    raw.map(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|_| AppError::Other(format!("bad admin expiry for {user_id}: {s}")))
    })
    .transpose()
}
