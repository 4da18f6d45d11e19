use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// Privilege tier of a caller inside a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Owner,
    Admin,
    Employee,
    Terminated,
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Employee => "employee",
            Role::Terminated => "terminated",
            Role::Unknown => "unknown",
        }
    }

    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Owner | Role::Admin)
    }

    /// Gate for check-in, breaks and leave: employee or higher.
    pub fn require_active(self) -> AppResult<Self> {
        match self {
            Role::Terminated => Err(AppError::Unauthorized(
                "your employment has been terminated".into(),
            )),
            Role::Unknown => Err(AppError::NotRegistered),
            other => Ok(other),
        }
    }

    /// Gate for workspace administration.
    pub fn require_admin(self) -> AppResult<Self> {
        if self.is_privileged() {
            Ok(self)
        } else {
            Err(AppError::Unauthorized("administrator rights required".into()))
        }
    }

    pub fn require_owner(self) -> AppResult<Self> {
        if self == Role::Owner {
            Ok(self)
        } else {
            Err(AppError::Unauthorized("only the owner can do this".into()))
        }
    }
}
