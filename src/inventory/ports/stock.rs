//! Repository port for catalogued stock items.

use crate::inventory::domain::{StockItem, StockItemId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for stock repository operations.
pub type StockRepositoryResult<T> = Result<T, StockRepositoryError>;

/// Stock item persistence contract.
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Stores a new catalogued item.
    ///
    /// # Errors
    ///
    /// Returns [`StockRepositoryError::DuplicateItem`] when the identifier
    /// already exists or [`StockRepositoryError::DuplicateItemCode`] when
    /// the item code is already catalogued.
    async fn store(&self, item: &StockItem) -> StockRepositoryResult<()>;

    /// Updates an existing item, including its stock level.
    ///
    /// # Errors
    ///
    /// Returns [`StockRepositoryError::NotFound`] when the item does not
    /// exist.
    async fn update(&self, item: &StockItem) -> StockRepositoryResult<()>;

    /// Finds an item by identifier.
    ///
    /// Returns `None` when the item does not exist.
    async fn find_by_id(&self, id: StockItemId) -> StockRepositoryResult<Option<StockItem>>;

    /// Finds an item by its catalogue code.
    ///
    /// Returns `None` when no item carries the code.
    async fn find_by_code(&self, code: &str) -> StockRepositoryResult<Option<StockItem>>;
}

/// Errors returned by stock repository implementations.
#[derive(Debug, Clone, Error)]
pub enum StockRepositoryError {
    /// An item with the same identifier already exists.
    #[error("duplicate stock item identifier: {0}")]
    DuplicateItem(StockItemId),

    /// An item with the same catalogue code already exists.
    #[error("duplicate item code: {0}")]
    DuplicateItemCode(String),

    /// The item was not found.
    #[error("stock item not found: {0}")]
    NotFound(StockItemId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StockRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
