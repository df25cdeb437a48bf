//! Domain model for stock, inward entries, and issue logs.
//!
//! Pure aggregates for catalogued stock items, inward restock entries with
//! their maintenance dates, and issue logs tracking stock drawn against
//! workflow documents.

mod class;
mod error;
mod ids;
mod issue_log;
mod item;
mod restock;

pub use class::ItemClass;
pub use error::{InventoryDomainError, ParseIssueLogStatusError, ParseItemClassError};
pub use ids::{IssueLogId, RestockId, StockItemId};
pub use issue_log::{IssueLog, IssueLogStatus, PersistedIssueLogData};
pub use item::{PersistedStockItemData, StockItem};
pub use restock::{MaintenanceWindow, PersistedRestockData, Restock, RestockParams};
