//! Stock issue and return bookkeeping.
//!
//! The seam the requisition workflow draws stock through: issuing decrements
//! the item level and opens an issue log; closing records returns and
//! losses and restores the returned units.

use crate::directory::domain::EmailAddress;
use crate::inventory::{
    domain::{InventoryDomainError, IssueLog, IssueLogId, StockItemId},
    ports::{
        IssueLogRepository, IssueLogRepositoryError, StockRepository, StockRepositoryError,
    },
};
use crate::sequence::domain::DocumentRef;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for stock issue bookkeeping.
#[derive(Debug, Error)]
pub enum StockIssueError {
    /// Domain validation or stock arithmetic failed.
    #[error(transparent)]
    Domain(#[from] InventoryDomainError),
    /// Stock persistence failed.
    #[error(transparent)]
    Stock(#[from] StockRepositoryError),
    /// Issue log persistence failed.
    #[error(transparent)]
    IssueLogs(#[from] IssueLogRepositoryError),
    /// The referenced item is not catalogued.
    #[error("stock item not found: {0}")]
    ItemNotFound(StockItemId),
    /// The referenced issue log does not exist.
    #[error("issue log not found: {0}")]
    LogNotFound(IssueLogId),
}

/// Result type for stock issue operations.
pub type StockIssueResult<T> = Result<T, StockIssueError>;

/// Request payload for issuing stock against a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogIssueRequest {
    /// Item to draw from.
    pub item: StockItemId,
    /// Document the issue is raised against.
    pub source: DocumentRef,
    /// Units to issue.
    pub quantity: u32,
    /// Address the stock is handed to.
    pub issued_to: EmailAddress,
}

/// Stock issue and return service.
#[derive(Clone)]
pub struct StockIssueService<S, L, C>
where
    S: StockRepository,
    L: IssueLogRepository,
    C: Clock + Send + Sync,
{
    stock: Arc<S>,
    issue_logs: Arc<L>,
    clock: Arc<C>,
}

impl<S, L, C> StockIssueService<S, L, C>
where
    S: StockRepository,
    L: IssueLogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a stock issue service.
    #[must_use]
    pub fn new(stock: Arc<S>, issue_logs: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            stock,
            issue_logs,
            clock,
        }
    }

    /// Issues stock against a document: decrements the item level and opens
    /// an issue log.
    ///
    /// Consumed-on-issue classes open the log already completed; everything
    /// else stays outstanding until [`Self::close_log`].
    ///
    /// # Errors
    ///
    /// Returns [`StockIssueError::ItemNotFound`] for an uncatalogued item
    /// and [`StockIssueError::Domain`] when the stock level cannot cover
    /// the request.
    pub async fn log_issue(&self, request: LogIssueRequest) -> StockIssueResult<IssueLog> {
        let mut item = self
            .stock
            .find_by_id(request.item)
            .await?
            .ok_or(StockIssueError::ItemNotFound(request.item))?;
        item.issue(request.quantity, &*self.clock)?;

        let log = IssueLog::open(
            item.id(),
            request.source,
            request.quantity,
            request.issued_to,
            item.class().is_consumed_on_issue(),
            &*self.clock,
        )?;

        self.stock.update(&item).await?;
        self.issue_logs.store(&log).await?;
        debug!(
            item = %item.id(),
            source = %request.source,
            quantity = request.quantity,
            status = log.status().as_str(),
            "stock issued"
        );
        Ok(log)
    }

    /// Closes an outstanding issue log, restoring the returned units to
    /// stock.
    ///
    /// # Errors
    ///
    /// Returns [`StockIssueError::LogNotFound`] for an unknown log and
    /// [`StockIssueError::Domain`] for an invalid transition or an
    /// over-return.
    pub async fn close_log(
        &self,
        id: IssueLogId,
        returned: u32,
        lost_or_damaged: u32,
    ) -> StockIssueResult<IssueLog> {
        let mut log = self
            .issue_logs
            .find_by_id(id)
            .await?
            .ok_or(StockIssueError::LogNotFound(id))?;
        log.close(returned, lost_or_damaged, &*self.clock)?;

        if returned > 0 {
            let mut item = self
                .stock
                .find_by_id(log.item())
                .await?
                .ok_or(StockIssueError::ItemNotFound(log.item()))?;
            item.receive(returned, &*self.clock)?;
            self.stock.update(&item).await?;
        }

        self.issue_logs.update(&log).await?;
        debug!(
            log = %log.id(),
            returned,
            lost_or_damaged,
            "issue log closed"
        );
        Ok(log)
    }

    /// Adds units back to an item without touching any issue log.
    ///
    /// Covers returns of classes that were written off at issue time and
    /// therefore have no outstanding log to close.
    ///
    /// # Errors
    ///
    /// Returns [`StockIssueError::ItemNotFound`] for an uncatalogued item
    /// and [`StockIssueError::Domain`] for a zero quantity.
    pub async fn return_to_stock(
        &self,
        item: StockItemId,
        quantity: u32,
    ) -> StockIssueResult<()> {
        let mut stocked = self
            .stock
            .find_by_id(item)
            .await?
            .ok_or(StockIssueError::ItemNotFound(item))?;
        stocked.receive(quantity, &*self.clock)?;
        self.stock.update(&stocked).await?;
        debug!(item = %item, quantity, "stock returned");
        Ok(())
    }

    /// Returns all issue logs raised against a document, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StockIssueError::IssueLogs`] when the lookup fails.
    pub async fn logs_for_source(&self, source: DocumentRef) -> StockIssueResult<Vec<IssueLog>> {
        Ok(self.issue_logs.find_by_source(source).await?)
    }
}
