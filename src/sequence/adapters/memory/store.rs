//! In-memory counter store for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sequence::{
    domain::SequencePrefix,
    ports::{SequenceStore, SequenceStoreError, SequenceStoreResult},
};

/// Thread-safe in-memory counter store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySequenceStore {
    state: Arc<RwLock<InMemorySequenceState>>,
}

#[derive(Debug, Default)]
struct InMemorySequenceState {
    counters: HashMap<String, u64>,
}

impl InMemorySequenceStore {
    /// Creates an empty in-memory counter store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current counter value for a prefix without incrementing.
    ///
    /// Returns `0` when the prefix has never been used.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceStoreError::Persistence`] when the state lock is
    /// poisoned.
    pub fn current(&self, prefix: &SequencePrefix) -> SequenceStoreResult<u64> {
        let state = self.state.read().map_err(|err| {
            SequenceStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.counters.get(prefix.as_str()).copied().unwrap_or(0))
    }
}

#[async_trait]
impl SequenceStore for InMemorySequenceStore {
    async fn next(&self, prefix: &SequencePrefix) -> SequenceStoreResult<u64> {
        let mut state = self.state.write().map_err(|err| {
            SequenceStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let counter = state.counters.entry(prefix.as_str().to_owned()).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }
}
