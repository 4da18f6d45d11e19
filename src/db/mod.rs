pub mod admins;
pub mod attendance;
pub mod breaks;
pub mod initialize;
pub mod leaves;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod settings;
pub mod users;

use crate::errors::AppError;
use crate::utils::time::from_db;
use chrono::{DateTime, FixedOffset};
use rusqlite::{Row, ffi};
use rust_decimal::Decimal;
use std::str::FromStr;

/// True when `err` is a UNIQUE/PRIMARY KEY violation.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

pub(crate) fn conversion_err(e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

pub(crate) fn ts_col(row: &Row, col: &str) -> rusqlite::Result<DateTime<FixedOffset>> {
    let raw: String = row.get(col)?;
    from_db(&raw).map_err(conversion_err)
}

pub(crate) fn opt_ts_col(row: &Row, col: &str) -> rusqlite::Result<Option<DateTime<FixedOffset>>> {
    let raw: Option<String> = row.get(col)?;
    raw.map(|s| from_db(&s).map_err(conversion_err)).transpose()
}

pub(crate) fn decimal_col(row: &Row, col: &str) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(col)?;
    Decimal::from_str(&raw)
        .map_err(|_| conversion_err(AppError::Other(format!("invalid amount in {col}: {raw}"))))
}

