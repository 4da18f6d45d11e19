use crate::db::{attendance, leaves, settings, users};
use crate::errors::AppResult;
use crate::models::payroll::{MonthlyStats, PayrollLine};
use crate::models::user::User;
use crate::utils::date::month_key;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Monthly roll-up of attendance, lateness and leave into pay.
pub struct PayrollAggregator;

impl PayrollAggregator {
    /// Never fails for a month without records: it yields zero days and zero lateness.
    pub fn monthly_stats(
        conn: &Connection,
        user_id: i64,
        chat_id: i64,
        month: u32,
        year: i32,
    ) -> AppResult<MonthlyStats> {
        let key = month_key(month, year)?;
        let mut stats = attendance::month_totals(conn, user_id, chat_id, &key)?;
        stats.approved_leaves = leaves::approved_in_month(conn, user_id, chat_id, &key)?;
        Ok(stats)
    }

    /// One line per active user of the workspace, ordered by user id.
    pub fn settle_month(conn: &Connection, chat_id: i64, month: u32, year: i32) -> AppResult<Vec<PayrollLine>> {
        let bonus = settings::load_settings(conn, chat_id)?.bonus;

        let mut lines = Vec::new();
        for user in users::active_users(conn, chat_id)? {
            let stats = Self::monthly_stats(conn, user.user_id, chat_id, month, year)?;
            lines.push(Self::line(&user, stats, bonus));
        }
        Ok(lines)
    }

    pub fn line(user: &User, stats: MonthlyStats, bonus: Decimal) -> PayrollLine {
        let eligible = stats.bonus_eligible();
        let final_pay = if eligible {
            user.base_salary + bonus
        } else {
            user.base_salary
        };

        PayrollLine {
            user_id: user.user_id,
            full_name: user.full_name.clone(),
            work_days: stats.work_days,
            late_minutes: stats.late_minutes,
            approved_leaves: stats.approved_leaves,
            bonus_eligible: eligible,
            base_salary: user.base_salary,
            final_pay,
        }
    }
}
