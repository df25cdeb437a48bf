//! Diesel row models for inventory persistence.

use super::schema::{issue_logs, restocks, stock_items};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for catalogued stock items.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = stock_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StockItemRow {
    /// Internal item identifier.
    pub id: uuid::Uuid,
    /// Item class tag.
    pub class: String,
    /// Catalogue code.
    pub code: String,
    /// Item name.
    pub name: String,
    /// Unit of measure.
    pub unit: String,
    /// Current stock level.
    pub quantity: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for catalogued stock items.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stock_items)]
pub struct NewStockItemRow {
    /// Internal item identifier.
    pub id: uuid::Uuid,
    /// Item class tag.
    pub class: String,
    /// Catalogue code.
    pub code: String,
    /// Item name.
    pub name: String,
    /// Unit of measure.
    pub unit: String,
    /// Current stock level.
    pub quantity: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for inward stock entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = restocks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RestockRow {
    /// Internal entry identifier.
    pub id: uuid::Uuid,
    /// Generated inward code.
    pub code: String,
    /// Replenished item.
    pub item: uuid::Uuid,
    /// Consignment description.
    pub description: Option<String>,
    /// Units received.
    pub quantity: i32,
    /// Unit of measure.
    pub unit: String,
    /// Chemical grade.
    pub grade: Option<String>,
    /// CAS registry number.
    pub cas_number: Option<String>,
    /// Hazard classification.
    pub hazard_class: Option<String>,
    /// Vendor reference.
    pub vendor: Option<uuid::Uuid>,
    /// Vendor invoice reference.
    pub invoice_reference: Option<String>,
    /// Expiry date.
    pub expiry_date: Option<NaiveDate>,
    /// Maintenance date.
    pub maintenance_date: Option<NaiveDate>,
    /// Recording account.
    pub recorded_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for inward stock entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = restocks)]
pub struct NewRestockRow {
    /// Internal entry identifier.
    pub id: uuid::Uuid,
    /// Generated inward code.
    pub code: String,
    /// Replenished item.
    pub item: uuid::Uuid,
    /// Consignment description.
    pub description: Option<String>,
    /// Units received.
    pub quantity: i32,
    /// Unit of measure.
    pub unit: String,
    /// Chemical grade.
    pub grade: Option<String>,
    /// CAS registry number.
    pub cas_number: Option<String>,
    /// Hazard classification.
    pub hazard_class: Option<String>,
    /// Vendor reference.
    pub vendor: Option<uuid::Uuid>,
    /// Vendor invoice reference.
    pub invoice_reference: Option<String>,
    /// Expiry date.
    pub expiry_date: Option<NaiveDate>,
    /// Maintenance date.
    pub maintenance_date: Option<NaiveDate>,
    /// Recording account.
    pub recorded_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for issue logs.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = issue_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IssueLogRow {
    /// Internal log identifier.
    pub id: uuid::Uuid,
    /// Issued item.
    pub item: uuid::Uuid,
    /// Source document reference payload.
    pub source: Value,
    /// Units issued.
    pub issued: i32,
    /// Units returned.
    pub returned: i32,
    /// Units lost or damaged.
    pub lost_or_damaged: i32,
    /// Recipient e-mail address.
    pub issued_to: String,
    /// Issue timestamp.
    pub issued_at: DateTime<Utc>,
    /// Return timestamp.
    pub returned_at: Option<DateTime<Utc>>,
    /// Lifecycle status tag.
    pub status: String,
}

/// Insert model for issue logs.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = issue_logs)]
pub struct NewIssueLogRow {
    /// Internal log identifier.
    pub id: uuid::Uuid,
    /// Issued item.
    pub item: uuid::Uuid,
    /// Source document reference payload.
    pub source: Value,
    /// Units issued.
    pub issued: i32,
    /// Units returned.
    pub returned: i32,
    /// Units lost or damaged.
    pub lost_or_damaged: i32,
    /// Recipient e-mail address.
    pub issued_to: String,
    /// Issue timestamp.
    pub issued_at: DateTime<Utc>,
    /// Return timestamp.
    pub returned_at: Option<DateTime<Utc>>,
    /// Lifecycle status tag.
    pub status: String,
}
