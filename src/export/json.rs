use crate::errors::AppResult;
use crate::models::payroll::PayrollLine;
use std::path::Path;

pub fn write_json(path: &Path, lines: &[PayrollLine]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(lines)?;
    std::fs::write(path, json)?;
    Ok(())
}
