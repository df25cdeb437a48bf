//! Departmental roles addressed by notifications.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role held by a departmental user account.
///
/// Notifications are addressed to roles rather than individuals; the
/// directory resolves each role to the accounts currently holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Departmental administrator.
    Admin,
    /// Laboratory assistant managing day-to-day stores.
    LabAssistant,
    /// Teaching or research faculty member.
    Faculty,
    /// Central stores officer.
    Stores,
    /// Departmental manager.
    Manager,
    /// Accounts officer.
    Accountant,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::LabAssistant => "lab-assistant",
            Self::Faculty => "faculty",
            Self::Stores => "stores",
            Self::Manager => "manager",
            Self::Accountant => "accountant",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "lab-assistant" => Ok(Self::LabAssistant),
            "faculty" => Ok(Self::Faculty),
            "stores" => Ok(Self::Stores),
            "manager" => Ok(Self::Manager),
            "accountant" => Ok(Self::Accountant),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
