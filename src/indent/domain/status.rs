//! Purchase request lifecycle states.

use super::ParsePurchaseRequestStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of a purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseRequestStatus {
    /// Awaiting an approval decision.
    Pending,
    /// Cleared for ordering.
    Approved,
    /// Declined; no further action.
    Rejected,
    /// An order was raised against the request.
    Ordered,
    /// The ordered items were handed over and the request closed.
    Issued,
}

impl PurchaseRequestStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Ordered => "ordered",
            Self::Issued => "issued",
        }
    }

    /// Returns `true` when a request may move from this status to `next`.
    ///
    /// Pending requests may be approved or rejected, approved ones ordered,
    /// and ordered ones issued. `Rejected` and `Issued` are terminal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Approved | Self::Rejected),
            Self::Approved => matches!(next, Self::Ordered),
            Self::Ordered => matches!(next, Self::Issued),
            Self::Rejected | Self::Issued => false,
        }
    }
}

impl TryFrom<&str> for PurchaseRequestStatus {
    type Error = ParsePurchaseRequestStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "ordered" => Ok(Self::Ordered),
            "issued" => Ok(Self::Issued),
            _ => Err(ParsePurchaseRequestStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for PurchaseRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval decision taken on a pending purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseRequestDecision {
    /// Clear the request for ordering.
    Approve,
    /// Decline the request.
    Reject,
}

impl PurchaseRequestDecision {
    /// Returns the status the decision moves the request into.
    #[must_use]
    pub const fn target_status(self) -> PurchaseRequestStatus {
        match self {
            Self::Approve => PurchaseRequestStatus::Approved,
            Self::Reject => PurchaseRequestStatus::Rejected,
        }
    }
}
