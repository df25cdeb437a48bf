//! `PostgreSQL` adapters for the ordering context.

mod models;
mod repository;
mod schema;

pub use repository::{OrderingPgPool, PostgresInvoiceRepository, PostgresOrderRepository};
