//! Purchase order and invoice lifecycle states.

use super::{ParseInvoiceStatusError, ParseOrderStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Awaiting an approval decision.
    Pending,
    /// Cleared for placement with the vendor.
    Approved,
    /// Declined; no further action.
    Rejected,
    /// Sent to the vendor.
    Placed,
    /// Goods received; the order is closed.
    Received,
}

impl OrderStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Placed => "placed",
            Self::Received => "received",
        }
    }

    /// Returns `true` when an order may move from this status to `next`.
    ///
    /// Pending orders may be approved or rejected, approved ones placed,
    /// and placed ones received. `Rejected` and `Received` are terminal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Approved | Self::Rejected),
            Self::Approved => matches!(next, Self::Placed),
            Self::Placed => matches!(next, Self::Received),
            Self::Rejected | Self::Received => false,
        }
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = ParseOrderStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "placed" => Ok(Self::Placed),
            "received" => Ok(Self::Received),
            _ => Err(ParseOrderStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval decision taken on a pending purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderDecision {
    /// Clear the order for placement.
    Approve,
    /// Decline the order.
    Reject,
}

impl OrderDecision {
    /// Returns the status the decision moves the order into.
    #[must_use]
    pub const fn target_status(self) -> OrderStatus {
        match self {
            Self::Approve => OrderStatus::Approved,
            Self::Reject => OrderStatus::Rejected,
        }
    }
}

/// Lifecycle states of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Awaiting an approval decision.
    Pending,
    /// Cleared for payment.
    Approved,
    /// Declined; no further action.
    Rejected,
    /// Decision deferred pending clarification.
    OnHold,
}

impl InvoiceStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::OnHold => "on_hold",
        }
    }

    /// Returns `true` when an invoice may move from this status to `next`.
    ///
    /// Pending invoices may be approved, rejected, or put on hold; held
    /// ones may still be approved or rejected. `Approved` and `Rejected`
    /// are terminal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Approved | Self::Rejected | Self::OnHold),
            Self::OnHold => matches!(next, Self::Approved | Self::Rejected),
            Self::Approved | Self::Rejected => false,
        }
    }

    /// Returns the name used in notification titles, e.g. `Invoice On Hold`.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::OnHold => "On Hold",
        }
    }
}

impl TryFrom<&str> for InvoiceStatus {
    type Error = ParseInvoiceStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "on_hold" => Ok(Self::OnHold),
            _ => Err(ParseInvoiceStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision taken on a pending or held invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceDecision {
    /// Clear the invoice for payment.
    Approve,
    /// Decline the invoice.
    Reject,
    /// Defer the decision.
    Hold,
}

impl InvoiceDecision {
    /// Returns the status the decision moves the invoice into.
    #[must_use]
    pub const fn target_status(self) -> InvoiceStatus {
        match self {
            Self::Approve => InvoiceStatus::Approved,
            Self::Reject => InvoiceStatus::Rejected,
            Self::Hold => InvoiceStatus::OnHold,
        }
    }
}
