mod csv;
mod json;

use crate::errors::AppResult;
use crate::models::payroll::PayrollLine;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write a month's payroll lines to `path`.
pub fn export_payroll(path: &Path, format: ExportFormat, lines: &[PayrollLine]) -> AppResult<()> {
    match format {
        ExportFormat::Csv => csv::write_csv(path, lines)?,
        ExportFormat::Json => json::write_json(path, lines)?,
    }
    success(format!(
        "{} export completed: {}",
        format.as_str().to_uppercase(),
        path.display()
    ));
    Ok(())
}
