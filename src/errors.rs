//! Unified application error type.
//! Every layer (db, core, cli, scheduler) returns AppError so the
//! chat-facing outcome of a failure is decided in one place.

use chrono::NaiveDate;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Role / precondition outcomes
    // ---------------------------
    #[error("Not registered: use `register <name>` first")]
    NotRegistered,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Already checked in on {0}")]
    AlreadyCheckedIn(NaiveDate),

    #[error("Not checked in today: use `in` before starting a break")]
    NotCheckedIn,

    #[error("Invalid argument: {0}")]
    Validation(String),

    // ---------------------------
    // Store
    // ---------------------------
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    // ---------------------------
    // IO / config
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Output
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("Notification failed: {0}")]
    Notify(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Export(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Export(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
