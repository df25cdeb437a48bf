//! Error types for purchase request validation and parsing.

use super::PurchaseRequestStatus;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or mutating purchase requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndentDomainError {
    /// A purchase request needs at least one line item.
    #[error("a purchase request needs at least one line item")]
    EmptyLines,

    /// A line quantity that must be positive was zero.
    #[error("line quantities must be positive")]
    ZeroQuantity,

    /// A requested item name is empty after trimming.
    #[error("requested item name must not be empty")]
    EmptyItemName,

    /// A line unit of measure is empty after trimming.
    #[error("line unit of measure must not be empty")]
    EmptyUnit,

    /// The required date lies in the past.
    #[error("required date {required} lies before today ({today})")]
    PastRequiredDate {
        /// Date the items are required by.
        required: NaiveDate,
        /// Current date used for the comparison.
        today: NaiveDate,
    },

    /// The request has left `Pending` and can no longer be amended.
    #[error("purchase request in status {status} can no longer be amended")]
    NotEditable {
        /// Status the request is currently in.
        status: PurchaseRequestStatus,
    },

    /// The requested status transition is not allowed.
    #[error("invalid purchase request transition from {from} to {to}")]
    InvalidTransition {
        /// Status the request is currently in.
        from: PurchaseRequestStatus,
        /// Status the transition was aiming for.
        to: PurchaseRequestStatus,
    },
}

/// Error returned while parsing purchase request statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown purchase request status: {0}")]
pub struct ParsePurchaseRequestStatusError(pub String);

/// Error returned while parsing purchase request kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown purchase request kind: {0}")]
pub struct ParsePurchaseRequestKindError(pub String);
