//! Error types for user directory validation and parsing.

use thiserror::Error;

/// Errors returned while constructing directory domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The e-mail address is not structurally valid.
    #[error("invalid e-mail address: {0}")]
    InvalidEmailAddress(String),

    /// The account display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The account carries no roles.
    #[error("account must hold at least one role")]
    NoRoles,
}

/// Error returned while parsing role tags from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
