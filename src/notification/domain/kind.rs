//! Notification kind vocabulary.

use super::ParseNotificationKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classifies a notification by the workflow event that raised it.
///
/// The kind participates in the duplicate-detection key: at most one
/// notification per (title, kind, day) is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A requisition was created.
    RequisitionCreated,
    /// A pending requisition was amended.
    RequisitionUpdated,
    /// A pending requisition was deleted.
    RequisitionDeleted,
    /// A requisition was approved.
    RequisitionApproved,
    /// A requisition was rejected.
    RequisitionRejected,
    /// Stock was issued against a requisition.
    RequisitionIssued,
    /// Issued stock was returned.
    RequisitionReturned,
    /// A new indent was created.
    IndentCreated,
    /// A pending indent was amended.
    IndentUpdated,
    /// A pending indent was deleted.
    IndentDeleted,
    /// An indent was approved.
    IndentApproved,
    /// An indent was rejected.
    IndentRejected,
    /// An approved indent was ordered.
    IndentOrdered,
    /// An ordered indent was issued.
    IndentIssued,
    /// An order request was created.
    OrderRequestCreated,
    /// A pending order request was amended.
    OrderRequestUpdated,
    /// A pending order request was deleted.
    OrderRequestDeleted,
    /// An order request was approved.
    OrderRequestApproved,
    /// An order request was rejected.
    OrderRequestRejected,
    /// An approved order request was ordered.
    OrderRequestOrdered,
    /// An ordered order request was issued.
    OrderRequestIssued,
    /// A purchase order was created.
    OrderCreated,
    /// An invoice was recorded against an order.
    InvoiceCreated,
    /// An invoice decision (approve, reject, hold) was taken.
    InvoiceDecided,
    /// An inward stock entry was recorded.
    InwardCreated,
    /// Equipment maintenance is due.
    EquipmentMaintenance,
}

impl NotificationKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequisitionCreated => "requisition_created",
            Self::RequisitionUpdated => "requisition_updated",
            Self::RequisitionDeleted => "requisition_deleted",
            Self::RequisitionApproved => "requisition_approved",
            Self::RequisitionRejected => "requisition_rejected",
            Self::RequisitionIssued => "requisition_issued",
            Self::RequisitionReturned => "requisition_returned",
            Self::IndentCreated => "indent_created",
            Self::IndentUpdated => "indent_updated",
            Self::IndentDeleted => "indent_deleted",
            Self::IndentApproved => "indent_approved",
            Self::IndentRejected => "indent_rejected",
            Self::IndentOrdered => "indent_ordered",
            Self::IndentIssued => "indent_issued",
            Self::OrderRequestCreated => "order_request_created",
            Self::OrderRequestUpdated => "order_request_updated",
            Self::OrderRequestDeleted => "order_request_deleted",
            Self::OrderRequestApproved => "order_request_approved",
            Self::OrderRequestRejected => "order_request_rejected",
            Self::OrderRequestOrdered => "order_request_ordered",
            Self::OrderRequestIssued => "order_request_issued",
            Self::OrderCreated => "order_created",
            Self::InvoiceCreated => "invoice_created",
            Self::InvoiceDecided => "invoice_decided",
            Self::InwardCreated => "inward_created",
            Self::EquipmentMaintenance => "equipment_maintenance",
        }
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = ParseNotificationKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "requisition_created" => Ok(Self::RequisitionCreated),
            "requisition_updated" => Ok(Self::RequisitionUpdated),
            "requisition_deleted" => Ok(Self::RequisitionDeleted),
            "requisition_approved" => Ok(Self::RequisitionApproved),
            "requisition_rejected" => Ok(Self::RequisitionRejected),
            "requisition_issued" => Ok(Self::RequisitionIssued),
            "requisition_returned" => Ok(Self::RequisitionReturned),
            "indent_created" => Ok(Self::IndentCreated),
            "indent_updated" => Ok(Self::IndentUpdated),
            "indent_deleted" => Ok(Self::IndentDeleted),
            "indent_approved" => Ok(Self::IndentApproved),
            "indent_rejected" => Ok(Self::IndentRejected),
            "indent_ordered" => Ok(Self::IndentOrdered),
            "indent_issued" => Ok(Self::IndentIssued),
            "order_request_created" => Ok(Self::OrderRequestCreated),
            "order_request_updated" => Ok(Self::OrderRequestUpdated),
            "order_request_deleted" => Ok(Self::OrderRequestDeleted),
            "order_request_approved" => Ok(Self::OrderRequestApproved),
            "order_request_rejected" => Ok(Self::OrderRequestRejected),
            "order_request_ordered" => Ok(Self::OrderRequestOrdered),
            "order_request_issued" => Ok(Self::OrderRequestIssued),
            "order_created" => Ok(Self::OrderCreated),
            "invoice_created" => Ok(Self::InvoiceCreated),
            "invoice_decided" => Ok(Self::InvoiceDecided),
            "inward_created" => Ok(Self::InwardCreated),
            "equipment_maintenance" => Ok(Self::EquipmentMaintenance),
            _ => Err(ParseNotificationKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
