//! In-memory purchase request repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::indent::{
    domain::{PurchaseRequest, PurchaseRequestId},
    ports::{
        PurchaseRequestRepository, PurchaseRequestRepositoryError,
        PurchaseRequestRepositoryResult,
    },
};

/// Thread-safe in-memory purchase request repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPurchaseRequestRepository {
    state: Arc<RwLock<HashMap<PurchaseRequestId, PurchaseRequest>>>,
}

impl InMemoryPurchaseRequestRepository {
    /// Creates an empty in-memory purchase request repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PurchaseRequestRepository for InMemoryPurchaseRequestRepository {
    async fn store(&self, request: &PurchaseRequest) -> PurchaseRequestRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PurchaseRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&request.id()) {
            return Err(PurchaseRequestRepositoryError::Duplicate(request.id()));
        }
        state.insert(request.id(), request.clone());
        Ok(())
    }

    async fn update(&self, request: &PurchaseRequest) -> PurchaseRequestRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PurchaseRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&request.id()) {
            return Err(PurchaseRequestRepositoryError::NotFound(request.id()));
        }
        state.insert(request.id(), request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: PurchaseRequestId,
    ) -> PurchaseRequestRepositoryResult<Option<PurchaseRequest>> {
        let state = self.state.read().map_err(|err| {
            PurchaseRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn remove(&self, id: PurchaseRequestId) -> PurchaseRequestRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PurchaseRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state
            .remove(&id)
            .map(|_| ())
            .ok_or(PurchaseRequestRepositoryError::NotFound(id))
    }
}
