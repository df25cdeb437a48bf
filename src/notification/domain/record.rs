//! Notification record aggregate.

use super::{NotificationDomainError, NotificationId, NotificationKind};
use crate::directory::domain::{Role, UserId};
use crate::sequence::domain::DocumentRef;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Days a notification stays visible when no explicit expiry is given.
const DEFAULT_TTL_DAYS: i64 = 30;

/// Role-addressed, TTL-expiring notification record.
///
/// One record is stored per workflow event; e-mail dispatch to the resolved
/// recipients is best-effort and never alters the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    title: String,
    message: String,
    kind: NotificationKind,
    actor: UserId,
    subject: Option<DocumentRef>,
    recipients: Vec<Role>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Parameter object for creating a notification record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationParams {
    /// Short human-readable title; part of the duplicate-detection key.
    pub title: String,
    /// Full message body.
    pub message: String,
    /// Workflow event classification; part of the duplicate-detection key.
    pub kind: NotificationKind,
    /// Account that triggered the event.
    pub actor: UserId,
    /// Document the notification is about, if any.
    pub subject: Option<DocumentRef>,
    /// Roles the notification is addressed to.
    pub recipients: Vec<Role>,
    /// Explicit expiry; defaults to thirty days after creation.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Persisted record identifier.
    pub id: NotificationId,
    /// Persisted title.
    pub title: String,
    /// Persisted message body.
    pub message: String,
    /// Persisted kind.
    pub kind: NotificationKind,
    /// Persisted actor.
    pub actor: UserId,
    /// Persisted document reference, if any.
    pub subject: Option<DocumentRef>,
    /// Persisted recipient roles.
    pub recipients: Vec<Role>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted expiry timestamp.
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a validated notification record.
    ///
    /// Duplicate recipient roles are collapsed; when no explicit expiry is
    /// given the record expires [`DEFAULT_TTL_DAYS`] days after creation.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDomainError::EmptyTitle`] or
    /// [`NotificationDomainError::EmptyMessage`] when the corresponding field
    /// is blank, [`NotificationDomainError::NoRecipientRoles`] when no roles
    /// remain after deduplication, and
    /// [`NotificationDomainError::InvalidExpiry`] when an explicit expiry is
    /// not after the creation instant.
    pub fn new(params: NotificationParams, clock: &impl Clock) -> Result<Self, NotificationDomainError> {
        let title = params.title.trim().to_owned();
        if title.is_empty() {
            return Err(NotificationDomainError::EmptyTitle);
        }
        let message = params.message.trim().to_owned();
        if message.is_empty() {
            return Err(NotificationDomainError::EmptyMessage);
        }

        let recipients = dedup_roles(params.recipients);
        if recipients.is_empty() {
            return Err(NotificationDomainError::NoRecipientRoles);
        }

        let created_at = clock.utc();
        let expires_at = params
            .expires_at
            .unwrap_or_else(|| created_at + Duration::days(DEFAULT_TTL_DAYS));
        if expires_at <= created_at {
            return Err(NotificationDomainError::InvalidExpiry {
                created_at,
                expires_at,
            });
        }

        Ok(Self {
            id: NotificationId::new(),
            title,
            message,
            kind: params.kind,
            actor: params.actor,
            subject: params.subject,
            recipients,
            created_at,
            expires_at,
        })
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            message: data.message,
            kind: data.kind,
            actor: data.actor,
            subject: data.subject,
            recipients: data.recipients,
            created_at: data.created_at,
            expires_at: data.expires_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the actor that triggered the event.
    #[must_use]
    pub const fn actor(&self) -> UserId {
        self.actor
    }

    /// Returns the referenced document, if any.
    #[must_use]
    pub const fn subject(&self) -> Option<DocumentRef> {
        self.subject
    }

    /// Returns the addressed roles.
    #[must_use]
    pub fn recipients(&self) -> &[Role] {
        &self.recipients
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the expiry timestamp.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns the UTC day of creation, the third part of the
    /// duplicate-detection key.
    #[must_use]
    pub fn created_on_day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Returns `true` when the record has expired at the given instant.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Collapses duplicate roles preserving first-occurrence order.
fn dedup_roles(roles: Vec<Role>) -> Vec<Role> {
    let mut seen = Vec::new();
    for role in roles {
        if !seen.contains(&role) {
            seen.push(role);
        }
    }
    seen
}
