//! `PostgreSQL` adapters for inventory persistence.

mod issue_logs;
mod models;
mod restocks;
mod schema;
mod stock;

pub use issue_logs::PostgresIssueLogRepository;
pub use restocks::PostgresRestockRepository;
pub use stock::{InventoryPgPool, PostgresStockRepository};
