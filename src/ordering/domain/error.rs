//! Error types for purchase order and invoice validation and parsing.

use super::{InvoiceStatus, Money, OrderStatus};
use thiserror::Error;

/// Longest note a purchase order may carry.
pub(crate) const MAX_NOTES_LENGTH: usize = 100;

/// Errors returned while constructing or mutating orders and invoices.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderingDomainError {
    /// A purchase order needs at least one priced line.
    #[error("a purchase order needs at least one line item")]
    EmptyLines,

    /// A line quantity that must be positive was zero.
    #[error("line quantities must be positive")]
    ZeroQuantity,

    /// A line description is empty after trimming.
    #[error("line description must not be empty")]
    EmptyDescription,

    /// The quotation reference is empty after trimming.
    #[error("quotation reference must not be empty")]
    EmptyQuotationRef,

    /// Two lines carry the same entry number.
    #[error("duplicate line entry number: {0}")]
    DuplicateEntryNumber(u32),

    /// The order notes exceed the permitted length.
    #[error("order notes run to {length} characters, over the {MAX_NOTES_LENGTH} limit")]
    NotesTooLong {
        /// Character count of the rejected notes.
        length: usize,
    },

    /// The declared total cost does not match the sum of the line costs.
    #[error("declared total cost {declared:?} does not match line sum {expected:?}")]
    TotalCostMismatch {
        /// Sum of the line costs.
        expected: Money,
        /// Total the caller declared.
        declared: Money,
    },

    /// The declared grand total does not equal total cost plus GST.
    #[error("declared grand total {declared:?} does not match cost plus GST {expected:?}")]
    GrandTotalMismatch {
        /// Total cost plus GST.
        expected: Money,
        /// Grand total the caller declared.
        declared: Money,
    },

    /// A monetary sum overflowed the minor-unit range.
    #[error("monetary amount out of range")]
    AmountOutOfRange,

    /// The requested order status transition is not allowed.
    #[error("invalid order transition from {from} to {to}")]
    InvalidOrderTransition {
        /// Status the order is currently in.
        from: OrderStatus,
        /// Status the transition was aiming for.
        to: OrderStatus,
    },

    /// The requested invoice status transition is not allowed.
    #[error("invalid invoice transition from {from} to {to}")]
    InvalidInvoiceTransition {
        /// Status the invoice is currently in.
        from: InvoiceStatus,
        /// Status the transition was aiming for.
        to: InvoiceStatus,
    },
}

/// Error returned while parsing order statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

/// Error returned while parsing invoice statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown invoice status: {0}")]
pub struct ParseInvoiceStatusError(pub String);
