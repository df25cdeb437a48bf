//! In-memory notification repository for tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::domain::Role;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};

/// Thread-safe in-memory notification repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    state: Arc<RwLock<InMemoryNotificationState>>,
}

type DayKey = (String, String, NaiveDate);

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    records: HashMap<NotificationId, Notification>,
    day_index: HashMap<DayKey, NotificationId>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn day_key(notification: &Notification) -> DayKey {
    (
        notification.title().to_owned(),
        notification.kind().as_str().to_owned(),
        notification.created_on_day(),
    )
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.records.contains_key(&notification.id()) {
            return Err(NotificationRepositoryError::DuplicateNotification(
                notification.id(),
            ));
        }

        let key = day_key(notification);
        if state.day_index.contains_key(&key) {
            return Err(NotificationRepositoryError::DuplicateSameDay {
                title: notification.title().to_owned(),
                kind: notification.kind(),
                day: notification.created_on_day(),
            });
        }

        state.day_index.insert(key, notification.id());
        state.records.insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        let state = self.state.read().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.records.get(&id).cloned())
    }

    async fn find_for_roles(
        &self,
        roles: &[Role],
        now: DateTime<Utc>,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let state = self.state.read().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut matching: Vec<Notification> = state
            .records
            .values()
            .filter(|record| !record.is_expired_at(now))
            .filter(|record| roles.iter().any(|role| record.recipients().contains(role)))
            .cloned()
            .collect();
        matching.sort_by_key(|record| std::cmp::Reverse(record.created_at()));
        Ok(matching)
    }

    async fn delete(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let removed = state
            .records
            .remove(&id)
            .ok_or(NotificationRepositoryError::NotFound(id))?;
        state.day_index.remove(&day_key(&removed));
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> NotificationRepositoryResult<u64> {
        let mut state = self.state.write().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let expired: Vec<NotificationId> = state
            .records
            .values()
            .filter(|record| record.is_expired_at(now))
            .map(Notification::id)
            .collect();
        for id in &expired {
            if let Some(removed) = state.records.remove(id) {
                state.day_index.remove(&day_key(&removed));
            }
        }
        Ok(expired.len() as u64)
    }
}
