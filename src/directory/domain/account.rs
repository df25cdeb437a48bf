//! User account aggregate.

use super::{DirectoryDomainError, EmailAddress, Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Departmental user account holding one or more roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    id: UserId,
    display_name: String,
    email: EmailAddress,
    roles: Vec<Role>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAccountData {
    /// Persisted account identifier.
    pub id: UserId,
    /// Persisted display name.
    pub display_name: String,
    /// Persisted e-mail address.
    pub email: EmailAddress,
    /// Persisted role list.
    pub roles: Vec<Role>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    /// Creates a new account with a validated display name and role set.
    ///
    /// Duplicate roles are collapsed; ordering of first occurrence is kept.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyDisplayName`] when the display
    /// name is blank or [`DirectoryDomainError::NoRoles`] when no roles
    /// remain after deduplication.
    pub fn new(
        raw_display_name: impl Into<String>,
        email: EmailAddress,
        roles: impl IntoIterator<Item = Role>,
        clock: &impl Clock,
    ) -> Result<Self, DirectoryDomainError> {
        let display_name = raw_display_name.into().trim().to_owned();
        if display_name.is_empty() {
            return Err(DirectoryDomainError::EmptyDisplayName);
        }

        let deduplicated = dedup_roles(roles);
        if deduplicated.is_empty() {
            return Err(DirectoryDomainError::NoRoles);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: UserId::new(),
            display_name,
            email,
            roles: deduplicated,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an account from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAccountData) -> Self {
        Self {
            id: data.id,
            display_name: data.display_name,
            email: data.email,
            roles: data.roles,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the e-mail address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the held roles.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Returns `true` when the account holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Collapses duplicate roles preserving first-occurrence order.
fn dedup_roles(roles: impl IntoIterator<Item = Role>) -> Vec<Role> {
    let mut seen = Vec::new();
    for role in roles {
        if !seen.contains(&role) {
            seen.push(role);
        }
    }
    seen
}
