//! Diesel row models for user directory persistence.

use super::schema::user_accounts;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for user accounts.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = user_accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserAccountRow {
    /// Internal account identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Display name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub display_name: String,
    /// E-mail address.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub email: String,
    /// Role tags as a JSON array.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub roles: Value,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for user accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_accounts)]
pub struct NewUserAccountRow {
    /// Internal account identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub display_name: String,
    /// E-mail address.
    pub email: String,
    /// Role tags as a JSON array.
    pub roles: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
