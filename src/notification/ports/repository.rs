//! Repository port for notification persistence and feed queries.

use crate::directory::domain::Role;
use crate::notification::domain::{Notification, NotificationId, NotificationKind};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification repository operations.
pub type NotificationRepositoryResult<T> = Result<T, NotificationRepositoryError>;

/// Notification persistence contract.
///
/// Implementations enforce the duplicate-detection invariant: at most one
/// record per (title, kind, UTC day).
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Stores a new notification record.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::DuplicateSameDay`] when a
    /// record with the same title and kind already exists for the same UTC
    /// day, or [`NotificationRepositoryError::DuplicateNotification`] when
    /// the identifier already exists.
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()>;

    /// Finds a notification by identifier.
    ///
    /// Returns `None` when the record does not exist.
    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>>;

    /// Returns unexpired notifications addressed to any of the given roles,
    /// newest first.
    async fn find_for_roles(
        &self,
        roles: &[Role],
        now: DateTime<Utc>,
    ) -> NotificationRepositoryResult<Vec<Notification>>;

    /// Deletes a notification record.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::NotFound`] when the record
    /// does not exist.
    async fn delete(&self, id: NotificationId) -> NotificationRepositoryResult<()>;

    /// Removes all records whose expiry is at or before `now`, returning the
    /// number removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> NotificationRepositoryResult<u64>;
}

/// Errors returned by notification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationRepositoryError {
    /// A record with the same identifier already exists.
    #[error("duplicate notification identifier: {0}")]
    DuplicateNotification(NotificationId),

    /// A record with the same title and kind already exists for the day.
    #[error("duplicate notification '{title}' ({kind}) for {day}")]
    DuplicateSameDay {
        /// Title of the rejected record.
        title: String,
        /// Kind of the rejected record.
        kind: NotificationKind,
        /// UTC day the duplicate fell on.
        day: NaiveDate,
    },

    /// The record was not found.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
