//! Counter store port backing document code generation.

use crate::sequence::domain::SequencePrefix;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sequence store operations.
pub type SequenceStoreResult<T> = Result<T, SequenceStoreError>;

/// Atomic increment-and-read counter contract.
///
/// Each prefix names an independent counter; the store must guarantee that
/// concurrent calls for the same prefix observe distinct, strictly
/// increasing values.
#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// Increments the counter for `prefix` and returns the new value.
    ///
    /// The first call for a prefix returns `1`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceStoreError::Persistence`] when the underlying store
    /// fails.
    async fn next(&self, prefix: &SequencePrefix) -> SequenceStoreResult<u64>;
}

/// Errors returned by sequence store implementations.
#[derive(Debug, Clone, Error)]
pub enum SequenceStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SequenceStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
