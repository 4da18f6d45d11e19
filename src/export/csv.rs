use crate::errors::AppResult;
use crate::models::payroll::PayrollLine;
use csv::Writer;
use std::path::Path;

pub fn write_csv(path: &Path, lines: &[PayrollLine]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "user_id",
        "full_name",
        "work_days",
        "late_minutes",
        "approved_leaves",
        "bonus_eligible",
        "base_salary",
        "final_pay",
    ])?;

    for l in lines {
        wtr.write_record(&[
            l.user_id.to_string(),
            l.full_name.clone(),
            l.work_days.to_string(),
            l.late_minutes.to_string(),
            l.approved_leaves.to_string(),
            l.bonus_eligible.to_string(),
            l.base_salary.to_string(),
            l.final_pay.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
