//! In-memory stock repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::inventory::{
    domain::{StockItem, StockItemId},
    ports::{StockRepository, StockRepositoryError, StockRepositoryResult},
};

/// Thread-safe in-memory stock repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockRepository {
    state: Arc<RwLock<InMemoryStockState>>,
}

#[derive(Debug, Default)]
struct InMemoryStockState {
    items: HashMap<StockItemId, StockItem>,
    code_index: HashMap<String, StockItemId>,
}

impl InMemoryStockRepository {
    /// Creates an empty in-memory stock repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StockRepository for InMemoryStockRepository {
    async fn store(&self, item: &StockItem) -> StockRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            StockRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.items.contains_key(&item.id()) {
            return Err(StockRepositoryError::DuplicateItem(item.id()));
        }
        if state.code_index.contains_key(item.code()) {
            return Err(StockRepositoryError::DuplicateItemCode(
                item.code().to_owned(),
            ));
        }

        state.code_index.insert(item.code().to_owned(), item.id());
        state.items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn update(&self, item: &StockItem) -> StockRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            StockRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.items.contains_key(&item.id()) {
            return Err(StockRepositoryError::NotFound(item.id()));
        }
        state.items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: StockItemId) -> StockRepositoryResult<Option<StockItem>> {
        let state = self.state.read().map_err(|err| {
            StockRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.items.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> StockRepositoryResult<Option<StockItem>> {
        let state = self.state.read().map_err(|err| {
            StockRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let item = state
            .code_index
            .get(code)
            .and_then(|id| state.items.get(id))
            .cloned();
        Ok(item)
    }
}
