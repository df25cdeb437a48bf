//! Diesel row models for requisition persistence.

use super::schema::requisitions;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for requisitions.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = requisitions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RequisitionRow {
    /// Internal requisition identifier.
    pub id: uuid::Uuid,
    /// Generated requisition code.
    pub code: String,
    /// Budget category kind tag.
    pub category_kind: String,
    /// Budget record identifier.
    pub category_ref: uuid::Uuid,
    /// Date the stock is required by.
    pub required_by: NaiveDate,
    /// Line items as a JSON document.
    pub lines: Value,
    /// Requesting account.
    pub requested_by: uuid::Uuid,
    /// Approving account.
    pub approved_by: Option<uuid::Uuid>,
    /// Issuing account.
    pub issued_by: Option<uuid::Uuid>,
    /// Decision timestamp.
    pub decided_at: Option<DateTime<Utc>>,
    /// Issue timestamp.
    pub issued_at: Option<DateTime<Utc>>,
    /// Lifecycle status tag.
    pub status: String,
    /// Requisition-level remark.
    pub remark: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for requisitions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = requisitions)]
pub struct NewRequisitionRow {
    /// Internal requisition identifier.
    pub id: uuid::Uuid,
    /// Generated requisition code.
    pub code: String,
    /// Budget category kind tag.
    pub category_kind: String,
    /// Budget record identifier.
    pub category_ref: uuid::Uuid,
    /// Date the stock is required by.
    pub required_by: NaiveDate,
    /// Line items as a JSON document.
    pub lines: Value,
    /// Requesting account.
    pub requested_by: uuid::Uuid,
    /// Lifecycle status tag.
    pub status: String,
    /// Requisition-level remark.
    pub remark: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}
