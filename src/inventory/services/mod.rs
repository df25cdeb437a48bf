//! Inventory services.

mod issue;
mod restocking;
mod scanner;

pub use issue::{LogIssueRequest, StockIssueError, StockIssueResult, StockIssueService};
pub use restocking::{RestockingError, RestockingResult, RestockingService};
pub use scanner::{
    MaintenanceScanError, MaintenanceScanOutcome, MaintenanceScanResult, MaintenanceScanner,
};
