use super::break_kind::BreakKind;
use serde::Serialize;

/// An open break whose elapsed time is strictly above its limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breach {
    pub chat_id: i64,
    pub user_id: i64,
    pub handle: String,
    pub kind: BreakKind,
    pub label: String,
    pub elapsed_minutes: i64,
}

impl Breach {
    pub fn message(&self) -> String {
        format!(
            "🚨 Overtime warning\n👤 @{} {} break has lasted {} minutes!",
            self.handle, self.label, self.elapsed_minutes
        )
    }
}
