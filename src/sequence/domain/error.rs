//! Error types for sequence-domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing sequence-domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SequenceDomainError {
    /// The counter prefix is empty or contains whitespace.
    #[error("invalid sequence prefix '{0}', expected a non-empty key without whitespace")]
    InvalidPrefix(String),

    /// The institution tag is empty or contains separators.
    #[error("invalid institution tag '{0}', expected a non-empty tag without whitespace or '/'")]
    InvalidInstitutionTag(String),

    /// The order-number grouping key is empty or contains separators.
    #[error("invalid grouping key '{0}', expected a non-empty key without whitespace or '/'")]
    InvalidGroupKey(String),

    /// A persisted document code is empty after trimming.
    #[error("document code must not be empty")]
    EmptyDocumentCode,

    /// A persisted order number is empty after trimming.
    #[error("order number must not be empty")]
    EmptyOrderNumber,
}

/// Error returned while parsing document kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown document kind: {0}")]
pub struct ParseDocumentKindError(pub String);

/// Error returned while parsing budget categories from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown budget category: {0}")]
pub struct ParseCategoryKindError(pub String);
