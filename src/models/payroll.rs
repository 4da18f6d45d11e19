use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyStats {
    pub work_days: i64,
    pub late_minutes: i64,
    pub approved_leaves: i64,
}

impl MonthlyStats {
    /// Perfect attendance: worked at least once, never late, no leave.
    pub fn bonus_eligible(&self) -> bool {
        self.work_days > 0 && self.late_minutes == 0 && self.approved_leaves == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PayrollLine {
    pub user_id: i64,
    pub full_name: String,
    pub work_days: i64,
    pub late_minutes: i64,
    pub approved_leaves: i64,
    pub bonus_eligible: bool,
    pub base_salary: Decimal,
    pub final_pay: Decimal,
}
