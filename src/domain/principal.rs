//! Session principal and role types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// Role a principal acts under for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Staff,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Staff => "staff",
            Role::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manager" => Ok(Role::Manager),
            "staff" => Ok(Role::Staff),
            "member" => Ok(Role::Member),
            other => Err(DomainError::validation(format!(
                "Unknown role '{}'. Expected manager, staff or member.",
                other
            ))),
        }
    }
}

/// Normalized form of the free-text `staff.role` column.
///
/// The mapping is total: "manager" in any letter case is [`StaffRole::Manager`],
/// every other stored value (including "Staff", "Librarian", "") is
/// [`StaffRole::Staff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffRole {
    Manager,
    Staff,
}

impl StaffRole {
    pub fn from_stored(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("manager") {
            StaffRole::Manager
        } else {
            StaffRole::Staff
        }
    }

    pub fn as_role(self) -> Role {
        match self {
            StaffRole::Manager => Role::Manager,
            StaffRole::Staff => Role::Staff,
        }
    }
}

/// The authenticated acting identity, threaded explicitly into every core call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: i32,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<i32>,
}

impl Principal {
    pub fn member(user_id: i32, name: impl Into<String>, member_id: i32) -> Self {
        Self {
            user_id,
            name: name.into(),
            role: Role::Member,
            member_id: Some(member_id),
            staff_id: None,
        }
    }

    pub fn staff(user_id: i32, name: impl Into<String>, role: StaffRole, staff_id: i32) -> Self {
        Self {
            user_id,
            name: name.into(),
            role: role.as_role(),
            member_id: None,
            staff_id: Some(staff_id),
        }
    }
}
