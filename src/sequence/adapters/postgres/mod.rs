//! `PostgreSQL` adapters for counter persistence.

mod schema;
mod store;

pub use store::{PostgresSequenceStore, SequencePgPool};
