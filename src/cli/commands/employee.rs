use crate::cli::Ctx;
use crate::cli::parser::Commands;
use crate::core::attendance::AttendanceLedger;
use crate::core::breaks::{BreakTracker, BreakTransition};
use crate::core::employee::EmployeeLogic;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::CheckOutOutcome;
use crate::models::break_kind::BreakKind;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{RESET, color_for_late};
use crate::utils::time::format_hhmm;

/// Employee self-service commands.
pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    let caller = ctx.caller()?;
    let mut pool = ctx.open_db()?;
    let employee = EmployeeLogic::new(ctx.roles, ctx.clock);

    match cmd {
        Commands::Register { handle, name } => {
            let full_name = name.join(" ");
            employee.register(&pool.conn, caller, handle.as_deref().unwrap_or(""), &full_name)?;
            success(format!("Registered: {}", full_name.trim()));
        }

        Commands::In => {
            let ledger = AttendanceLedger::new(ctx.roles, ctx.clock);
            match ledger.check_in(&pool.conn, caller, ctx.now) {
                Ok(receipt) => {
                    success(format!(
                        "Checked in at {}  late: {}{} min{}",
                        format_hhmm(&receipt.checked_in_at),
                        color_for_late(receipt.late_mins),
                        receipt.late_mins,
                        RESET
                    ));
                    if receipt.rest_day {
                        info("Today is a rest day for this workspace.");
                    }
                }
                Err(AppError::AlreadyCheckedIn(date)) => {
                    warning(format!("Already checked in on {date}."));
                }
                Err(e) => return Err(e),
            }
        }

        Commands::Out => {
            let ledger = AttendanceLedger::new(ctx.roles, ctx.clock);
            match ledger.check_out(&pool.conn, caller, ctx.now)? {
                CheckOutOutcome::Recorded => success(format!("Checked out at {}", ctx.now.format("%H:%M"))),
                CheckOutOutcome::NothingToClose => warning("No check-in found for today; nothing recorded."),
            }
        }

        Commands::Toilet | Commands::Smoke => {
            let kind = if matches!(cmd, Commands::Toilet) {
                BreakKind::Toilet
            } else {
                BreakKind::Smoke
            };
            let tracker = BreakTracker::new(ctx.roles, ctx.clock);
            let transition = tracker.toggle(&mut pool.conn, caller, kind, ctx.now)?;
            match transition {
                BreakTransition::Started { at } => {
                    info(format!("⏳ {} break started at {}", kind.label(), format_hhmm(&at)));
                }
                ended @ BreakTransition::Ended { .. } => {
                    success(format!(
                        "{} break ended after {} min",
                        kind.label(),
                        ended.duration_minutes().unwrap_or(0)
                    ));
                }
            }
        }

        Commands::Leave { kind, reason } => {
            let req = employee.request_leave(&pool.conn, caller, kind, &reason.join(" "), ctx.now)?;
            success(format!("Leave recorded ({}), status: approved", req.kind));
        }

        Commands::Resign => {
            employee.resign(&pool.conn, caller, ctx.now)?;
            success("Resignation recorded. Goodbye!");
        }

        Commands::Status => {
            let st = employee.status(&pool.conn, caller, ctx.now)?;
            println!("Role: {}", st.role.as_str());
            match &st.today {
                Some(rec) => {
                    let out = rec
                        .check_out
                        .as_ref()
                        .map(format_hhmm)
                        .unwrap_or_else(|| "--:--".to_string());
                    println!(
                        "Today: in {}  out {}  late {} min",
                        format_hhmm(&rec.check_in),
                        out,
                        rec.late_mins
                    );
                }
                None => println!("Today: not checked in"),
            }
            for b in &st.open_breaks {
                let mins = (ctx.now - b.start_at).num_minutes();
                println!("On {} break since {} ({} min)", b.kind.label(), format_hhmm(&b.start_at), mins);
            }
        }

        _ => {}
    }

    Ok(())
}
