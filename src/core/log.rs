use crate::db::log::load_log;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use rusqlite::Connection;

fn color_for_operation(op: &str) -> &'static str {
    match op {
        "check_in" | "check_out" | "register" => GREEN,
        "fire" | "resign" => RED,
        "break" | "leave" => YELLOW,
        _ => CYAN,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection, limit: usize) -> AppResult<()> {
        let entries = load_log(conn, limit)?;
        if entries.is_empty() {
            println!("(audit log is empty)");
            return Ok(());
        }

        let op_width = entries
            .iter()
            .map(|(_, op, target, _)| op.len() + target.len() + 3)
            .max()
            .unwrap_or(0)
            .min(40);

        for (date, op, target, message) in entries.iter().rev() {
            let date = chrono::DateTime::parse_from_rfc3339(date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or_else(|_| date.clone());
            let op_target = if target.is_empty() {
                op.clone()
            } else {
                format!("{op} ({target})")
            };
            println!(
                "{}  {}{:<w$}{}  {}",
                date,
                color_for_operation(op),
                op_target,
                RESET,
                message,
                w = op_width
            );
        }
        Ok(())
    }
}
