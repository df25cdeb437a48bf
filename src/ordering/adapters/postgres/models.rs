//! Diesel row models for ordering persistence.

use super::schema::{invoices, purchase_orders};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for purchase orders.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = purchase_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PurchaseOrderRow {
    /// Internal order identifier.
    pub id: uuid::Uuid,
    /// Generated monthly document code.
    pub po_number: String,
    /// Generated financial-year order number.
    pub order_number: String,
    /// Budget category kind tag.
    pub category_kind: String,
    /// Budget record identifier.
    pub category_ref: uuid::Uuid,
    /// Vendor record identifier.
    pub vendor: uuid::Uuid,
    /// Vendor quotation reference.
    pub quotation_ref: String,
    /// Vendor quotation date.
    pub quotation_date: NaiveDate,
    /// Priced line items as a JSON document.
    pub lines: Value,
    /// Total of the line costs, in paise.
    pub total_cost: i64,
    /// GST across the order, in paise.
    pub total_gst: i64,
    /// Grand total, in paise.
    pub grand_total: i64,
    /// Free-form order notes.
    pub notes: Option<String>,
    /// Creating account.
    pub created_by: uuid::Uuid,
    /// Approving account.
    pub approved_by: Option<uuid::Uuid>,
    /// Decision timestamp.
    pub decided_at: Option<DateTime<Utc>>,
    /// Lifecycle status tag.
    pub status: String,
    /// Order-level remark.
    pub remark: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for purchase orders.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = purchase_orders)]
pub struct NewPurchaseOrderRow {
    /// Internal order identifier.
    pub id: uuid::Uuid,
    /// Generated monthly document code.
    pub po_number: String,
    /// Generated financial-year order number.
    pub order_number: String,
    /// Budget category kind tag.
    pub category_kind: String,
    /// Budget record identifier.
    pub category_ref: uuid::Uuid,
    /// Vendor record identifier.
    pub vendor: uuid::Uuid,
    /// Vendor quotation reference.
    pub quotation_ref: String,
    /// Vendor quotation date.
    pub quotation_date: NaiveDate,
    /// Priced line items as a JSON document.
    pub lines: Value,
    /// Total of the line costs, in paise.
    pub total_cost: i64,
    /// GST across the order, in paise.
    pub total_gst: i64,
    /// Grand total, in paise.
    pub grand_total: i64,
    /// Free-form order notes.
    pub notes: Option<String>,
    /// Creating account.
    pub created_by: uuid::Uuid,
    /// Lifecycle status tag.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for invoices.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invoices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InvoiceRow {
    /// Internal invoice identifier.
    pub id: uuid::Uuid,
    /// Purchase order the invoice bills against.
    pub order_id: uuid::Uuid,
    /// Vendor bill number.
    pub bill_number: i64,
    /// Date printed on the bill.
    pub bill_date: NaiveDate,
    /// Billed amount, in paise.
    pub amount: i64,
    /// Lifecycle status tag.
    pub status: String,
    /// Recording account.
    pub created_by: uuid::Uuid,
    /// Deciding account.
    pub approved_by: Option<uuid::Uuid>,
    /// Decision timestamp.
    pub decided_at: Option<DateTime<Utc>>,
    /// Comment from the recording account.
    pub comment: Option<String>,
    /// Decision remark.
    pub remark: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for invoices.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub struct NewInvoiceRow {
    /// Internal invoice identifier.
    pub id: uuid::Uuid,
    /// Purchase order the invoice bills against.
    pub order_id: uuid::Uuid,
    /// Vendor bill number.
    pub bill_number: i64,
    /// Date printed on the bill.
    pub bill_date: NaiveDate,
    /// Billed amount, in paise.
    pub amount: i64,
    /// Lifecycle status tag.
    pub status: String,
    /// Recording account.
    pub created_by: uuid::Uuid,
    /// Comment from the recording account.
    pub comment: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}
