//! Output paths given on the command line.

use crate::errors::{AppError, AppResult};
use std::path::PathBuf;

/// Resolve an export target: `~/` is the home directory, an empty name is rejected.
pub fn export_target(raw: &str) -> AppResult<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation("export file name is empty".into()));
    }
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => Ok(home.join(rest)),
        _ => Ok(PathBuf::from(raw)),
    }
}
