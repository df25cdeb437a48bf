//! Requisition lifecycle states.

use super::ParseRequisitionStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of a stock requisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequisitionStatus {
    /// Awaiting an approval decision.
    Pending,
    /// Cleared for stock issue.
    Approved,
    /// Declined; no further action.
    Rejected,
    /// Stock was handed out against the requisition.
    Issued,
    /// Issued stock was accounted for and the requisition closed.
    Returned,
}

impl RequisitionStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Issued => "issued",
            Self::Returned => "returned",
        }
    }

    /// Returns `true` when a requisition may move from this status to
    /// `next`.
    ///
    /// Pending requisitions may be approved or rejected, approved ones
    /// issued, and issued ones returned. `Rejected` and `Returned` are
    /// terminal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Approved | Self::Rejected),
            Self::Approved => matches!(next, Self::Issued),
            Self::Issued => matches!(next, Self::Returned),
            Self::Rejected | Self::Returned => false,
        }
    }
}

impl TryFrom<&str> for RequisitionStatus {
    type Error = ParseRequisitionStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "issued" => Ok(Self::Issued),
            "returned" => Ok(Self::Returned),
            _ => Err(ParseRequisitionStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for RequisitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval decision taken on a pending requisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequisitionDecision {
    /// Clear the requisition for issue.
    Approve,
    /// Decline the requisition.
    Reject,
}

impl RequisitionDecision {
    /// Returns the status the decision moves the requisition into.
    #[must_use]
    pub const fn target_status(self) -> RequisitionStatus {
        match self {
            Self::Approve => RequisitionStatus::Approved,
            Self::Reject => RequisitionStatus::Rejected,
        }
    }
}
