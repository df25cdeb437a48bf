//! `PostgreSQL` notification repository implementation.

use super::{
    models::{NewNotificationRow, NotificationRow},
    schema::notifications,
};
use crate::directory::domain::{Role, UserId};
use crate::notification::{
    domain::{Notification, NotificationId, NotificationKind, PersistedNotificationData},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::sequence::domain::DocumentRef;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by notification adapters.
pub type NotificationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed notification repository.
#[derive(Debug, Clone)]
pub struct PostgresNotificationRepository {
    pool: NotificationPgPool,
}

impl PostgresNotificationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotificationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> NotificationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NotificationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(NotificationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(NotificationRepositoryError::persistence)?
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let record_id = notification.id();
        let title = notification.title().to_owned();
        let kind = notification.kind();
        let day = notification.created_on_day();
        let new_row = to_new_row(notification)?;

        self.run_blocking(move |connection| {
            // The unique index on (title, kind, created_on) still enforces
            // the invariant in the window between this check and the insert;
            // the pre-check only improves the reported error.
            let duplicate = notifications::table
                .filter(notifications::title.eq(&title))
                .filter(notifications::kind.eq(kind.as_str()))
                .filter(notifications::created_on.eq(day))
                .count()
                .get_result::<i64>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            if duplicate > 0 {
                return Err(NotificationRepositoryError::DuplicateSameDay {
                    title: title.clone(),
                    kind,
                    day,
                });
            }

            diesel::insert_into(notifications::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_same_day_unique_violation(info.as_ref()) =>
                    {
                        NotificationRepositoryError::DuplicateSameDay {
                            title: title.clone(),
                            kind,
                            day,
                        }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        NotificationRepositoryError::DuplicateNotification(record_id)
                    }
                    _ => NotificationRepositoryError::persistence(err),
                })?;

            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        self.run_blocking(move |connection| {
            let row = notifications::table
                .filter(notifications::id.eq(id.into_inner()))
                .select(NotificationRow::as_select())
                .first::<NotificationRow>(connection)
                .optional()
                .map_err(NotificationRepositoryError::persistence)?;
            row.map(row_to_notification).transpose()
        })
        .await
    }

    async fn find_for_roles(
        &self,
        roles: &[Role],
        now: DateTime<Utc>,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let role_tags: Vec<String> = roles.iter().map(|role| role.as_str().to_owned()).collect();
        self.run_blocking(move |connection| {
            let query = diesel::sql_query(concat!(
                "SELECT id, title, message, kind, actor, subject, recipients, ",
                "created_at, created_on, expires_at FROM notifications ",
                "WHERE recipients ?| $1 AND expires_at > $2 ",
                "ORDER BY created_at DESC",
            ))
            .bind::<diesel::sql_types::Array<diesel::sql_types::Text>, _>(role_tags)
            .bind::<diesel::sql_types::Timestamptz, _>(now);

            let rows = query
                .get_results::<NotificationRow>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            rows.into_iter().map(row_to_notification).collect()
        })
        .await
    }

    async fn delete(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed =
                diesel::delete(notifications::table.filter(notifications::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(NotificationRepositoryError::persistence)?;
            if removed == 0 {
                return Err(NotificationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> NotificationRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let removed =
                diesel::delete(notifications::table.filter(notifications::expires_at.le(now)))
                    .execute(connection)
                    .map_err(NotificationRepositoryError::persistence)?;
            Ok(removed as u64)
        })
        .await
    }
}

fn to_new_row(notification: &Notification) -> NotificationRepositoryResult<NewNotificationRow> {
    let subject = notification
        .subject()
        .map(|subject| serde_json::to_value(subject))
        .transpose()
        .map_err(NotificationRepositoryError::persistence)?;
    let recipients = serde_json::to_value(notification.recipients())
        .map_err(NotificationRepositoryError::persistence)?;

    Ok(NewNotificationRow {
        id: notification.id().into_inner(),
        title: notification.title().to_owned(),
        message: notification.message().to_owned(),
        kind: notification.kind().as_str().to_owned(),
        actor: notification.actor().into_inner(),
        subject,
        recipients,
        created_at: notification.created_at(),
        created_on: notification.created_on_day(),
        expires_at: notification.expires_at(),
    })
}

fn row_to_notification(row: NotificationRow) -> NotificationRepositoryResult<Notification> {
    let NotificationRow {
        id,
        title,
        message,
        kind: persisted_kind,
        actor,
        subject: persisted_subject,
        recipients: persisted_recipients,
        created_at,
        created_on: _,
        expires_at,
    } = row;

    let kind = NotificationKind::try_from(persisted_kind.as_str())
        .map_err(NotificationRepositoryError::invalid_persisted_data)?;
    let subject = persisted_subject
        .map(serde_json::from_value::<DocumentRef>)
        .transpose()
        .map_err(NotificationRepositoryError::invalid_persisted_data)?;
    let recipients = serde_json::from_value::<Vec<Role>>(persisted_recipients)
        .map_err(NotificationRepositoryError::invalid_persisted_data)?;

    let data = PersistedNotificationData {
        id: NotificationId::from_uuid(id),
        title,
        message,
        kind,
        actor: UserId::from_uuid(actor),
        subject,
        recipients,
        created_at,
        expires_at,
    };
    Ok(Notification::from_persisted(data))
}

fn is_same_day_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_notifications_title_kind_day_unique")
}
