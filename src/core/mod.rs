pub mod admin;
pub mod attendance;
pub mod breaks;
pub mod clock;
pub mod employee;
pub mod log;
pub mod overtime;
pub mod payroll;
pub mod roles;

use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use rusqlite::Connection;
use std::fmt;

/// Who issued a command, and in which workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
    pub chat_id: i64,
}

impl Caller {
    pub fn new(user_id: i64, chat_id: i64) -> Self {
        Self { user_id, chat_id }
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user_id, self.chat_id)
    }
}

/// Subject of an admin command: `@handle` or a numeric user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Handle(String),
    Id(i64),
}

impl Target {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();
        if let Some(h) = raw.strip_prefix('@') {
            if h.is_empty() {
                return Err(AppError::Validation("empty @handle".into()));
            }
            return Ok(Target::Handle(h.to_string()));
        }
        raw.parse::<i64>()
            .map(Target::Id)
            .map_err(|_| AppError::Validation(format!("'{raw}' is neither @handle nor user id")))
    }

    /// The registered user this target names inside `chat_id`.
    pub fn lookup(&self, conn: &Connection, chat_id: i64) -> AppResult<User> {
        let found = match self {
            Target::Handle(h) => users::find_by_handle(conn, chat_id, h)?,
            Target::Id(id) => users::find_user(conn, *id, chat_id)?,
        };
        found.ok_or(AppError::NotRegistered)
    }
}
