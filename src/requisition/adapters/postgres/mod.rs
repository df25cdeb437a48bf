//! `PostgreSQL` adapters for the requisition context.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresRequisitionRepository, RequisitionPgPool};
