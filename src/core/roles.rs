use crate::db::{admins, users};
use crate::errors::AppResult;
use crate::models::role::Role;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Maps a caller to a role. The owner identity is fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct RoleResolver {
    owner_id: Option<i64>,
}

impl RoleResolver {
    pub fn new(owner_id: Option<i64>) -> Self {
        Self { owner_id }
    }

    /// Precedence: owner, then an unexpired admin grant, then the user row.
    pub fn resolve(
        &self,
        conn: &Connection,
        user_id: i64,
        chat_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Role> {
        if self.owner_id == Some(user_id) {
            return Ok(Role::Owner);
        }

        if let Some(expiry) = admins::grant_expiry(conn, user_id)?
            && expiry > now
        {
            return Ok(Role::Admin);
        }

        let role = match users::find_user(conn, user_id, chat_id)? {
            None => Role::Unknown,
            Some(u) if u.active => Role::Employee,
            Some(_) => Role::Terminated,
        };
        Ok(role)
    }
}
