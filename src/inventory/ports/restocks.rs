//! Repository port for inward stock entries.

use crate::inventory::domain::{MaintenanceWindow, Restock, RestockId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for restock repository operations.
pub type RestockRepositoryResult<T> = Result<T, RestockRepositoryError>;

/// Inward stock entry persistence contract.
#[async_trait]
pub trait RestockRepository: Send + Sync {
    /// Stores a new inward entry.
    ///
    /// # Errors
    ///
    /// Returns [`RestockRepositoryError::DuplicateRestock`] when the
    /// identifier already exists.
    async fn store(&self, restock: &Restock) -> RestockRepositoryResult<()>;

    /// Finds an inward entry by identifier.
    ///
    /// Returns `None` when the entry does not exist.
    async fn find_by_id(&self, id: RestockId) -> RestockRepositoryResult<Option<Restock>>;

    /// Returns the entries whose maintenance date falls inside the window,
    /// ordered by maintenance date.
    async fn maintenance_due(
        &self,
        window: &MaintenanceWindow,
    ) -> RestockRepositoryResult<Vec<Restock>>;
}

/// Errors returned by restock repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RestockRepositoryError {
    /// An entry with the same identifier already exists.
    #[error("duplicate restock identifier: {0}")]
    DuplicateRestock(RestockId),

    /// The entry was not found.
    #[error("restock not found: {0}")]
    NotFound(RestockId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RestockRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
