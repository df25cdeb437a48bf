//! Error types for notification domain validation and parsing.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing notification domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationDomainError {
    /// The notification title is empty after trimming.
    #[error("notification title must not be empty")]
    EmptyTitle,

    /// The notification message is empty after trimming.
    #[error("notification message must not be empty")]
    EmptyMessage,

    /// The notification carries no recipient roles.
    #[error("notification must address at least one role")]
    NoRecipientRoles,

    /// The expiry is not after the creation instant.
    #[error("expiry {expires_at} must be after creation {created_at}")]
    InvalidExpiry {
        /// Creation instant.
        created_at: DateTime<Utc>,
        /// Rejected expiry instant.
        expires_at: DateTime<Utc>,
    },
}

/// Error returned while parsing notification kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown notification kind: {0}")]
pub struct ParseNotificationKindError(pub String);
