//! Error types for requisition domain validation and parsing.

use super::{RequisitionLineId, RequisitionStatus};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or mutating requisitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequisitionDomainError {
    /// A requisition needs at least one line item.
    #[error("a requisition needs at least one line item")]
    EmptyLines,

    /// A line quantity that must be positive was zero.
    #[error("line quantities must be positive")]
    ZeroQuantity,

    /// A line unit of measure is empty after trimming.
    #[error("line unit of measure must not be empty")]
    EmptyUnit,

    /// A line description is empty after trimming.
    #[error("line description must not be empty")]
    EmptyDescription,

    /// The required date lies in the past.
    #[error("required date {required} lies before today ({today})")]
    PastRequiredDate {
        /// Date the stock is required by.
        required: NaiveDate,
        /// Current date used for the comparison.
        today: NaiveDate,
    },

    /// The requisition has left `Pending` and can no longer be amended.
    #[error("requisition in status {status} can no longer be amended")]
    NotEditable {
        /// Status the requisition is currently in.
        status: RequisitionStatus,
    },

    /// The requested status transition is not allowed.
    #[error("invalid requisition transition from {from} to {to}")]
    InvalidTransition {
        /// Status the requisition is currently in.
        from: RequisitionStatus,
        /// Status the transition was aiming for.
        to: RequisitionStatus,
    },

    /// A referenced line is not part of the requisition.
    #[error("line {0} is not part of the requisition")]
    UnknownLine(RequisitionLineId),

    /// Returned plus lost-or-damaged units exceed what was issued on a line.
    #[error(
        "return on line {line} exceeds issue: {returned} returned + \
         {lost_or_damaged} lost or damaged against {issued} issued"
    )]
    ReturnExceedsIssued {
        /// Line the return was recorded against.
        line: RequisitionLineId,
        /// Units issued on the line.
        issued: u32,
        /// Units being returned.
        returned: u32,
        /// Units reported lost or damaged.
        lost_or_damaged: u32,
    },

    /// A return must account for at least one unit on some line.
    #[error("a return must account for at least one unit")]
    EmptyReturn,
}

/// Error returned while parsing requisition statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown requisition status: {0}")]
pub struct ParseRequisitionStatusError(pub String);
