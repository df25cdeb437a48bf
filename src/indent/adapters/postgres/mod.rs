//! `PostgreSQL` adapters for the purchase request context.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresPurchaseRequestRepository, PurchaseRequestPgPool};
