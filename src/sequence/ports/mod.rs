//! Port contracts for document code generation.

pub mod numbering;
pub mod store;

pub use numbering::DocumentNumbering;
pub use store::{SequenceStore, SequenceStoreError, SequenceStoreResult};
