use crate::cli::Ctx;
use crate::cli::parser::Commands;
use crate::core::admin::AdminLogic;
use crate::errors::{AppError, AppResult};
use crate::export::export_payroll;
use crate::ui::messages::{header, info};
use crate::utils::date::parse_date;
use crate::utils::path::export_target;
use crate::utils::table::Table;
use crate::utils::time::format_hhmm;
use chrono::Datelike;

pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    let caller = ctx.caller()?;
    let pool = ctx.open_db()?;
    let admin = AdminLogic::new(ctx.roles);

    match cmd {
        Commands::ReportDay { date } => {
            let day = match date {
                Some(d) => parse_date(d).ok_or_else(|| AppError::Validation(format!("invalid date '{d}'")))?,
                None => ctx.now.date_naive(),
            };
            let report = admin.report_day(&pool.conn, caller, day, ctx.now)?;

            header(format!(
                "Attendance {}{}",
                report.date,
                if report.rest_day { " (rest day)" } else { "" }
            ));

            let mut table = Table::new(&["NAME", "IN", "OUT", "LATE"]);
            for l in &report.lines {
                table.add_row(vec![
                    l.full_name.clone(),
                    format_hhmm(&l.check_in),
                    l.check_out.as_ref().map(format_hhmm).unwrap_or_else(|| "--:--".into()),
                    format!("{} min", l.late_mins),
                ]);
            }
            if table.is_empty() {
                info("No check-ins recorded.");
            } else {
                print!("{}", table.render());
            }
        }

        Commands::ReportMonth {
            month,
            year,
            format,
            file,
        } => {
            let today = ctx.now.date_naive();
            let month = month.unwrap_or(today.month());
            let year = year.unwrap_or(today.year());
            let lines = admin.report_month(&pool.conn, caller, month, year, ctx.now)?;

            header(format!("Payroll {year}-{month:02}"));

            let mut table = Table::new(&["NAME", "DAYS", "LATE", "LEAVES", "BONUS", "BASE", "PAY"]);
            for l in &lines {
                table.add_row(vec![
                    l.full_name.clone(),
                    l.work_days.to_string(),
                    format!("{} min", l.late_minutes),
                    l.approved_leaves.to_string(),
                    if l.bonus_eligible { "yes".into() } else { "no".into() },
                    l.base_salary.to_string(),
                    l.final_pay.to_string(),
                ]);
            }
            print!("{}", table.render());

            if let (Some(fmt), Some(path)) = (format, file) {
                export_payroll(&export_target(path)?, *fmt, &lines)?;
            }
        }

        _ => {}
    }

    Ok(())
}
