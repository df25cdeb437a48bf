//! In-memory inventory adapters.

mod issue_logs;
mod restocks;
mod stock;

pub use issue_logs::InMemoryIssueLogRepository;
pub use restocks::InMemoryRestockRepository;
pub use stock::InMemoryStockRepository;
