//! In-memory requisition repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::requisition::{
    domain::{Requisition, RequisitionId},
    ports::{RequisitionRepository, RequisitionRepositoryError, RequisitionRepositoryResult},
};

/// Thread-safe in-memory requisition repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRequisitionRepository {
    state: Arc<RwLock<HashMap<RequisitionId, Requisition>>>,
}

impl InMemoryRequisitionRepository {
    /// Creates an empty in-memory requisition repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequisitionRepository for InMemoryRequisitionRepository {
    async fn store(&self, requisition: &Requisition) -> RequisitionRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            RequisitionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&requisition.id()) {
            return Err(RequisitionRepositoryError::Duplicate(requisition.id()));
        }
        state.insert(requisition.id(), requisition.clone());
        Ok(())
    }

    async fn update(&self, requisition: &Requisition) -> RequisitionRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            RequisitionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&requisition.id()) {
            return Err(RequisitionRepositoryError::NotFound(requisition.id()));
        }
        state.insert(requisition.id(), requisition.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: RequisitionId,
    ) -> RequisitionRepositoryResult<Option<Requisition>> {
        let state = self.state.read().map_err(|err| {
            RequisitionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn remove(&self, id: RequisitionId) -> RequisitionRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            RequisitionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state
            .remove(&id)
            .map(|_| ())
            .ok_or(RequisitionRepositoryError::NotFound(id))
    }
}
