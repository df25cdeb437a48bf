//! Diesel row models for notification persistence.

use super::schema::notifications;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for notification records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    /// Internal record identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Title.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub title: String,
    /// Message body.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub message: String,
    /// Kind tag.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub kind: String,
    /// Actor identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub actor: uuid::Uuid,
    /// Referenced document payload, if any.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Jsonb>)]
    pub subject: Option<Value>,
    /// Addressed role tags as a JSON array.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub recipients: Value,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// UTC day of creation.
    #[diesel(sql_type = diesel::sql_types::Date)]
    pub created_on: NaiveDate,
    /// Expiry timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub expires_at: DateTime<Utc>,
}

/// Insert model for notification records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotificationRow {
    /// Internal record identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Message body.
    pub message: String,
    /// Kind tag.
    pub kind: String,
    /// Actor identifier.
    pub actor: uuid::Uuid,
    /// Referenced document payload, if any.
    pub subject: Option<Value>,
    /// Addressed role tags as a JSON array.
    pub recipients: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// UTC day of creation.
    pub created_on: NaiveDate,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}
