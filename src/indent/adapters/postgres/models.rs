//! Diesel row models for purchase request persistence.

use super::schema::purchase_requests;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for purchase requests.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = purchase_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PurchaseRequestRow {
    /// Internal request identifier.
    pub id: uuid::Uuid,
    /// Generated request code.
    pub code: String,
    /// Document flavour tag.
    pub kind: String,
    /// Budget category kind tag.
    pub category_kind: String,
    /// Budget record identifier.
    pub category_ref: uuid::Uuid,
    /// Date the items are required by.
    pub required_by: NaiveDate,
    /// Line items as a JSON document.
    pub lines: Value,
    /// Requesting account.
    pub requested_by: uuid::Uuid,
    /// Approving account.
    pub approved_by: Option<uuid::Uuid>,
    /// Ordering account.
    pub ordered_by: Option<uuid::Uuid>,
    /// Decision timestamp.
    pub decided_at: Option<DateTime<Utc>>,
    /// Ordering timestamp.
    pub ordered_at: Option<DateTime<Utc>>,
    /// Lifecycle status tag.
    pub status: String,
    /// Request-level remark.
    pub remark: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for purchase requests.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = purchase_requests)]
pub struct NewPurchaseRequestRow {
    /// Internal request identifier.
    pub id: uuid::Uuid,
    /// Generated request code.
    pub code: String,
    /// Document flavour tag.
    pub kind: String,
    /// Budget category kind tag.
    pub category_kind: String,
    /// Budget record identifier.
    pub category_ref: uuid::Uuid,
    /// Date the items are required by.
    pub required_by: NaiveDate,
    /// Line items as a JSON document.
    pub lines: Value,
    /// Requesting account.
    pub requested_by: uuid::Uuid,
    /// Lifecycle status tag.
    pub status: String,
    /// Request-level remark.
    pub remark: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}
