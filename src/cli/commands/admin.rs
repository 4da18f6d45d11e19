use crate::cli::Ctx;
use crate::cli::parser::Commands;
use crate::core::Target;
use crate::core::admin::AdminLogic;
use crate::errors::AppResult;
use crate::models::break_kind::BreakKind;
use crate::ui::messages::success;

/// Workspace configuration and personnel commands.
pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    let caller = ctx.caller()?;
    let pool = ctx.open_db()?;
    let conn = &pool.conn;
    let admin = AdminLogic::new(ctx.roles);

    match cmd {
        Commands::SetWork { hours } => {
            let h = admin.set_work_hours(conn, caller, hours, ctx.now)?;
            success(format!("Work hours set to {h}"));
        }
        Commands::SetOff { days } => {
            let d = admin.set_off_days(conn, caller, days, ctx.now)?;
            if d.is_empty() {
                success("Rest days cleared");
            } else {
                success(format!("Rest days set to {d}"));
            }
        }
        Commands::SetSalary { target, amount } => {
            let target = Target::parse(target)?;
            let a = admin.set_salary(conn, caller, &target, amount, ctx.now)?;
            success(format!("Base salary set to {a}"));
        }
        Commands::SetBonus { amount } => {
            let a = admin.set_bonus(conn, caller, amount, ctx.now)?;
            success(format!("Perfect-attendance bonus set to {a}"));
        }
        Commands::SetToilet { minutes } => {
            admin.set_break_limit(conn, caller, BreakKind::Toilet, *minutes, ctx.now)?;
            success(format!("Restroom limit set to {minutes} min"));
        }
        Commands::SetSmoke { minutes } => {
            admin.set_break_limit(conn, caller, BreakKind::Smoke, *minutes, ctx.now)?;
            success(format!("Smoking limit set to {minutes} min"));
        }
        Commands::Fire { target } => {
            let target = Target::parse(target)?;
            let name = admin.fire(conn, caller, &target, ctx.now)?;
            success(format!("{name} has been terminated"));
        }
        Commands::SetAdmin { target, days } => {
            let target = Target::parse(target)?;
            let until = admin.grant_admin(conn, caller, &target, *days, ctx.now)?;
            success(format!(
                "Admin rights granted until {}",
                ctx.clock.localize(until).format("%Y-%m-%d %H:%M")
            ));
        }
        _ => {}
    }

    Ok(())
}
