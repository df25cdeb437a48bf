//! In-memory adapters for document code generation.

mod store;

pub use store::InMemorySequenceStore;
