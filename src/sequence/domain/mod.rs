//! Domain model for document code generation.
//!
//! Pure value types describing counter prefixes, monthly document codes, and
//! financial-year order numbers. Counter state itself lives behind the
//! [`crate::sequence::ports::SequenceStore`] port.

mod code;
mod error;
mod reference;

pub use code::{
    CategoryKind, DocumentCode, DocumentKind, FinancialYear, GroupKey, InstitutionTag,
    OrderNumber, SequencePrefix,
};
pub use error::{ParseCategoryKindError, ParseDocumentKindError, SequenceDomainError};
pub use reference::{CategoryRef, DocumentRef};
