use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub user_id: i64,
    pub chat_id: i64,
    pub username: String,  // ⇔ users.username (chat handle, without '@')
    pub full_name: String, // ⇔ users.full_name
    pub base_salary: Decimal,
    pub active: bool,
}

impl User {
    pub fn mention(&self) -> String {
        format!("@{}", self.username)
    }
}
