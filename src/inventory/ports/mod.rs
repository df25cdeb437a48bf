//! Port contracts for inventory persistence.

pub mod issue_logs;
pub mod restocks;
pub mod stock;

pub use issue_logs::{IssueLogRepository, IssueLogRepositoryError, IssueLogRepositoryResult};
pub use restocks::{RestockRepository, RestockRepositoryError, RestockRepositoryResult};
pub use stock::{StockRepository, StockRepositoryError, StockRepositoryResult};
