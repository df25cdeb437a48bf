//! Repository port for purchase requests.

use crate::indent::domain::{PurchaseRequest, PurchaseRequestId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for purchase request repository operations.
pub type PurchaseRequestRepositoryResult<T> = Result<T, PurchaseRequestRepositoryError>;

/// Purchase request persistence contract.
#[async_trait]
pub trait PurchaseRequestRepository: Send + Sync {
    /// Stores a new purchase request.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseRequestRepositoryError::Duplicate`] when the
    /// identifier or code already exists.
    async fn store(&self, request: &PurchaseRequest) -> PurchaseRequestRepositoryResult<()>;

    /// Updates an existing purchase request.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseRequestRepositoryError::NotFound`] when the
    /// request does not exist.
    async fn update(&self, request: &PurchaseRequest) -> PurchaseRequestRepositoryResult<()>;

    /// Finds a purchase request by identifier.
    ///
    /// Returns `None` when the request does not exist.
    async fn find_by_id(
        &self,
        id: PurchaseRequestId,
    ) -> PurchaseRequestRepositoryResult<Option<PurchaseRequest>>;

    /// Removes a purchase request.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseRequestRepositoryError::NotFound`] when the
    /// request does not exist.
    async fn remove(&self, id: PurchaseRequestId) -> PurchaseRequestRepositoryResult<()>;
}

/// Errors returned by purchase request repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PurchaseRequestRepositoryError {
    /// A request with the same identifier or code already exists.
    #[error("duplicate purchase request: {0}")]
    Duplicate(PurchaseRequestId),

    /// The request was not found.
    #[error("purchase request not found: {0}")]
    NotFound(PurchaseRequestId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PurchaseRequestRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
