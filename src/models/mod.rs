pub mod attendance;
pub mod breach;
pub mod break_interval;
pub mod break_kind;
pub mod leave;
pub mod payroll;
pub mod role;
pub mod settings;
pub mod user;
