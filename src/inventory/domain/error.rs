//! Error types for inventory domain validation and parsing.

use super::IssueLogStatus;
use thiserror::Error;

/// Errors returned while constructing or mutating inventory domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryDomainError {
    /// The item name is empty after trimming.
    #[error("item name must not be empty")]
    EmptyItemName,

    /// The item code is empty after trimming.
    #[error("item code must not be empty")]
    EmptyItemCode,

    /// The unit of measure is empty after trimming.
    #[error("unit of measure must not be empty")]
    EmptyUnit,

    /// A quantity that must be positive was zero.
    #[error("quantity must be positive")]
    ZeroQuantity,

    /// The stock level cannot cover the requested quantity.
    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock {
        /// Units currently in stock.
        available: u32,
        /// Units requested for issue.
        requested: u32,
    },

    /// A stock adjustment would overflow the quantity range.
    #[error("stock adjustment overflows the quantity range")]
    QuantityOverflow,

    /// Returned plus lost-or-damaged units exceed the issued quantity.
    #[error(
        "over-return: {returned} returned + {lost_or_damaged} lost or damaged \
         exceeds {issued} issued"
    )]
    OverReturn {
        /// Units originally issued.
        issued: u32,
        /// Units being returned.
        returned: u32,
        /// Units reported lost or damaged.
        lost_or_damaged: u32,
    },

    /// The requested issue log transition is not allowed.
    #[error("invalid issue log transition from {from} to {to}")]
    InvalidLogTransition {
        /// Status the log is currently in.
        from: IssueLogStatus,
        /// Status the transition was aiming for.
        to: IssueLogStatus,
    },
}

/// Error returned while parsing item classes from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown item class: {0}")]
pub struct ParseItemClassError(pub String);

/// Error returned while parsing issue log statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issue log status: {0}")]
pub struct ParseIssueLogStatusError(pub String);
