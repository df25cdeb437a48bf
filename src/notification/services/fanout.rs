//! Notification fan-out orchestration.
//!
//! Persists one record per workflow event, resolves recipient roles to
//! e-mail addresses through the user directory, and dispatches best-effort
//! e-mails. A same-day duplicate suppresses the whole fan-out without
//! failing the calling operation.

use crate::directory::{
    domain::{EmailAddress, Role, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::notification::{
    domain::{
        Notification, NotificationDomainError, NotificationId, NotificationKind,
        NotificationParams, OutboundEmail,
    },
    ports::{Mailer, NotificationRepository, NotificationRepositoryError},
};
use crate::sequence::domain::DocumentRef;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use super::templates::{EmailTemplates, TemplateRenderError};

/// Request payload for publishing a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishNotificationRequest {
    title: String,
    message: String,
    kind: NotificationKind,
    actor: UserId,
    subject: Option<DocumentRef>,
    recipients: Vec<Role>,
    expires_at: Option<DateTime<Utc>>,
}

impl PublishNotificationRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        actor: UserId,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            actor,
            subject: None,
            recipients: Vec::new(),
            expires_at: None,
        }
    }

    /// Sets the referenced document.
    #[must_use]
    pub const fn with_subject(mut self, subject: DocumentRef) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Sets the addressed roles.
    #[must_use]
    pub fn with_recipients(mut self, recipients: impl IntoIterator<Item = Role>) -> Self {
        self.recipients = recipients.into_iter().collect();
        self
    }

    /// Sets an explicit expiry instant.
    #[must_use]
    pub const fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Returns the notification title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the notification message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the notification kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the acting account.
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

    /// Returns the explicit expiry instant, if any.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

/// Sender identity stamped on outbound e-mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    address: EmailAddress,
    display_name: String,
}

impl SenderIdentity {
    /// Creates a sender identity.
    #[must_use]
    pub fn new(address: EmailAddress, display_name: impl Into<String>) -> Self {
        Self {
            address,
            display_name: display_name.into(),
        }
    }

    /// Returns the sender address.
    #[must_use]
    pub const fn address(&self) -> &EmailAddress {
        &self.address
    }

    /// Returns the sender display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Service-level errors for notification fan-out.
#[derive(Debug, Error)]
pub enum NotificationFanoutError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] NotificationDomainError),
    /// Notification persistence failed.
    #[error(transparent)]
    Repository(#[from] NotificationRepositoryError),
    /// Recipient resolution failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// Body rendering failed.
    #[error(transparent)]
    Template(#[from] TemplateRenderError),
    /// The addressed roles resolved to zero e-mail addresses. The stored
    /// record is retained.
    #[error("no recipients resolved for notification '{title}'")]
    NoRecipients {
        /// Title of the stored notification.
        title: String,
    },
}

/// Result type for notification fan-out operations.
pub type NotificationFanoutResult<T> = Result<T, NotificationFanoutError>;

/// Publishing seam the workflow contexts depend on.
///
/// Implemented by [`NotificationFanout`]; service tests substitute mocks.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publishes a notification: persists the record, resolves recipients,
    /// and dispatches best-effort e-mail.
    ///
    /// Returns `Ok(None)` when a record with the same title and kind was
    /// already published on the same UTC day; the event is suppressed
    /// without error. Individual e-mail failures are logged and never fail
    /// the operation.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationFanoutError::Domain`] when the request fails
    /// validation, [`NotificationFanoutError::NoRecipients`] when the roles
    /// resolve to zero addresses (the record is kept), and repository or
    /// template errors otherwise.
    async fn publish(
        &self,
        request: PublishNotificationRequest,
    ) -> NotificationFanoutResult<Option<Notification>>;

    /// Publishes a workflow event, tolerating unresolvable recipients.
    ///
    /// Workflow operations must not fail because no account currently holds
    /// an addressed role; the record is kept and the gap is logged.
    ///
    /// # Errors
    ///
    /// Propagates every error except
    /// [`NotificationFanoutError::NoRecipients`].
    async fn publish_event(
        &self,
        request: PublishNotificationRequest,
    ) -> NotificationFanoutResult<()> {
        match self.publish(request).await {
            Ok(_) => Ok(()),
            Err(NotificationFanoutError::NoRecipients { title }) => {
                warn!(
                    title = title.as_str(),
                    "workflow notification has no resolvable recipients"
                );
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

/// Notification fan-out service.
#[derive(Clone)]
pub struct NotificationFanout<N, D, M, C>
where
    N: NotificationRepository,
    D: UserDirectory,
    M: Mailer,
    C: Clock + Send + Sync,
{
    notifications: Arc<N>,
    directory: Arc<D>,
    mailer: Arc<M>,
    clock: Arc<C>,
    templates: EmailTemplates,
    sender: SenderIdentity,
}

impl<N, D, M, C> NotificationFanout<N, D, M, C>
where
    N: NotificationRepository,
    D: UserDirectory,
    M: Mailer,
    C: Clock + Send + Sync,
{
    /// Creates a fan-out service with default e-mail templates.
    #[must_use]
    pub fn new(
        notifications: Arc<N>,
        directory: Arc<D>,
        mailer: Arc<M>,
        clock: Arc<C>,
        sender: SenderIdentity,
    ) -> Self {
        Self {
            notifications,
            directory,
            mailer,
            clock,
            templates: EmailTemplates::new(),
            sender,
        }
    }

    /// Replaces the e-mail templates.
    #[must_use]
    pub fn with_templates(mut self, templates: EmailTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Returns the unexpired in-app feed for the given roles, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationFanoutError::Repository`] when the lookup
    /// fails.
    pub async fn feed_for_roles(
        &self,
        roles: &[Role],
    ) -> NotificationFanoutResult<Vec<Notification>> {
        let now = self.clock.utc();
        Ok(self.notifications.find_for_roles(roles, now).await?)
    }

    /// Deletes a notification from the feed.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationFanoutError::Repository`] when the record does
    /// not exist or deletion fails.
    pub async fn dismiss(&self, id: NotificationId) -> NotificationFanoutResult<()> {
        Ok(self.notifications.delete(id).await?)
    }

    /// Removes expired records, returning the number purged.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationFanoutError::Repository`] when the purge fails.
    pub async fn purge_expired(&self) -> NotificationFanoutResult<u64> {
        let now = self.clock.utc();
        Ok(self.notifications.purge_expired(now).await?)
    }

    /// Resolves roles to a deduplicated, deterministically ordered address
    /// list.
    async fn resolve_recipients(
        &self,
        roles: &[Role],
    ) -> Result<Vec<EmailAddress>, UserDirectoryError> {
        let mut addresses = BTreeSet::new();
        for role in roles {
            for address in self.directory.emails_with_role(*role).await? {
                addresses.insert(address);
            }
        }
        Ok(addresses.into_iter().collect())
    }
}

#[async_trait]
impl<N, D, M, C> NotificationPublisher for NotificationFanout<N, D, M, C>
where
    N: NotificationRepository,
    D: UserDirectory,
    M: Mailer,
    C: Clock + Send + Sync,
{
    async fn publish(
        &self,
        request: PublishNotificationRequest,
    ) -> NotificationFanoutResult<Option<Notification>> {
        let params = NotificationParams {
            title: request.title,
            message: request.message,
            kind: request.kind,
            actor: request.actor,
            subject: request.subject,
            recipients: request.recipients,
            expires_at: request.expires_at,
        };
        let notification = Notification::new(params, &*self.clock)?;

        match self.notifications.store(&notification).await {
            Ok(()) => {}
            Err(NotificationRepositoryError::DuplicateSameDay { title, kind, day }) => {
                debug!(
                    title = title.as_str(),
                    kind = kind.as_str(),
                    day = %day,
                    "suppressed same-day duplicate notification"
                );
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        }

        let recipients = self.resolve_recipients(notification.recipients()).await?;
        if recipients.is_empty() {
            warn!(
                title = notification.title(),
                "notification stored but no recipients resolved"
            );
            return Err(NotificationFanoutError::NoRecipients {
                title: notification.title().to_owned(),
            });
        }

        let body = self.templates.render_body(
            notification.title(),
            notification.message(),
            self.sender.display_name(),
        )?;

        let mut delivered = 0_usize;
        for to in &recipients {
            let email = OutboundEmail::new(
                self.sender.address().clone(),
                to.clone(),
                notification.title(),
                body.clone(),
            );
            match self.mailer.send(&email).await {
                Ok(()) => delivered += 1,
                Err(error) => {
                    warn!(
                        recipient = to.as_str(),
                        error = %error,
                        "notification e-mail dispatch failed"
                    );
                }
            }
        }
        debug!(
            title = notification.title(),
            recipients = recipients.len(),
            delivered,
            "notification dispatched"
        );

        Ok(Some(notification))
    }
}
