//! In-memory restock repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::inventory::{
    domain::{MaintenanceWindow, Restock, RestockId},
    ports::{RestockRepository, RestockRepositoryError, RestockRepositoryResult},
};

/// Thread-safe in-memory restock repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRestockRepository {
    state: Arc<RwLock<HashMap<RestockId, Restock>>>,
}

impl InMemoryRestockRepository {
    /// Creates an empty in-memory restock repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RestockRepository for InMemoryRestockRepository {
    async fn store(&self, restock: &Restock) -> RestockRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            RestockRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&restock.id()) {
            return Err(RestockRepositoryError::DuplicateRestock(restock.id()));
        }
        state.insert(restock.id(), restock.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: RestockId) -> RestockRepositoryResult<Option<Restock>> {
        let state = self.state.read().map_err(|err| {
            RestockRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn maintenance_due(
        &self,
        window: &MaintenanceWindow,
    ) -> RestockRepositoryResult<Vec<Restock>> {
        let state = self.state.read().map_err(|err| {
            RestockRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut due: Vec<Restock> = state
            .values()
            .filter(|restock| restock.maintenance_due_within(window))
            .cloned()
            .collect();
        due.sort_by_key(Restock::maintenance_date);
        Ok(due)
    }
}
