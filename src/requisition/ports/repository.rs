//! Repository port for requisitions.

use crate::requisition::domain::{Requisition, RequisitionId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for requisition repository operations.
pub type RequisitionRepositoryResult<T> = Result<T, RequisitionRepositoryError>;

/// Requisition persistence contract.
#[async_trait]
pub trait RequisitionRepository: Send + Sync {
    /// Stores a new requisition.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionRepositoryError::Duplicate`] when the
    /// identifier or code already exists.
    async fn store(&self, requisition: &Requisition) -> RequisitionRepositoryResult<()>;

    /// Updates an existing requisition.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionRepositoryError::NotFound`] when the
    /// requisition does not exist.
    async fn update(&self, requisition: &Requisition) -> RequisitionRepositoryResult<()>;

    /// Finds a requisition by identifier.
    ///
    /// Returns `None` when the requisition does not exist.
    async fn find_by_id(
        &self,
        id: RequisitionId,
    ) -> RequisitionRepositoryResult<Option<Requisition>>;

    /// Removes a requisition.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionRepositoryError::NotFound`] when the
    /// requisition does not exist.
    async fn remove(&self, id: RequisitionId) -> RequisitionRepositoryResult<()>;
}

/// Errors returned by requisition repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RequisitionRepositoryError {
    /// A requisition with the same identifier or code already exists.
    #[error("duplicate requisition: {0}")]
    Duplicate(RequisitionId),

    /// The requisition was not found.
    #[error("requisition not found: {0}")]
    NotFound(RequisitionId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RequisitionRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
