//! Repository port for issue logs.

use crate::inventory::domain::{IssueLog, IssueLogId};
use crate::sequence::domain::DocumentRef;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for issue log repository operations.
pub type IssueLogRepositoryResult<T> = Result<T, IssueLogRepositoryError>;

/// Issue log persistence contract.
#[async_trait]
pub trait IssueLogRepository: Send + Sync {
    /// Stores a new issue log.
    ///
    /// # Errors
    ///
    /// Returns [`IssueLogRepositoryError::DuplicateIssueLog`] when the
    /// identifier already exists.
    async fn store(&self, log: &IssueLog) -> IssueLogRepositoryResult<()>;

    /// Updates an existing issue log.
    ///
    /// # Errors
    ///
    /// Returns [`IssueLogRepositoryError::NotFound`] when the log does not
    /// exist.
    async fn update(&self, log: &IssueLog) -> IssueLogRepositoryResult<()>;

    /// Finds an issue log by identifier.
    ///
    /// Returns `None` when the log does not exist.
    async fn find_by_id(&self, id: IssueLogId) -> IssueLogRepositoryResult<Option<IssueLog>>;

    /// Returns all logs raised against a source document, oldest first.
    async fn find_by_source(&self, source: DocumentRef)
    -> IssueLogRepositoryResult<Vec<IssueLog>>;
}

/// Errors returned by issue log repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IssueLogRepositoryError {
    /// A log with the same identifier already exists.
    #[error("duplicate issue log identifier: {0}")]
    DuplicateIssueLog(IssueLogId),

    /// The log was not found.
    #[error("issue log not found: {0}")]
    NotFound(IssueLogId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IssueLogRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
