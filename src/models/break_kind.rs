use serde::Serialize;

/// Kind of timed absence. Each variant has its own limit column in
/// `chat_settings` and a default used when the workspace has no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BreakKind {
    Toilet,
    Smoke,
}

impl BreakKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            BreakKind::Toilet => "toilet",
            BreakKind::Smoke => "smoke",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "toilet" => Some(BreakKind::Toilet),
            "smoke" => Some(BreakKind::Smoke),
            _ => None,
        }
    }

    /// Human label used in notifications.
    pub fn label(&self) -> &'static str {
        match self {
            BreakKind::Toilet => "restroom",
            BreakKind::Smoke => "smoking",
        }
    }

    pub fn default_limit(&self) -> i64 {
        match self {
            BreakKind::Toilet => 15,
            BreakKind::Smoke => 10,
        }
    }

    /// Column of `chat_settings` holding this kind's limit.
    pub fn limit_column(&self) -> &'static str {
        match self {
            BreakKind::Toilet => "toilet_limit",
            BreakKind::Smoke => "smoke_limit",
        }
    }
}
