//! In-memory issue log repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::inventory::{
    domain::{IssueLog, IssueLogId},
    ports::{IssueLogRepository, IssueLogRepositoryError, IssueLogRepositoryResult},
};
use crate::sequence::domain::DocumentRef;

/// Thread-safe in-memory issue log repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueLogRepository {
    state: Arc<RwLock<HashMap<IssueLogId, IssueLog>>>,
}

impl InMemoryIssueLogRepository {
    /// Creates an empty in-memory issue log repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IssueLogRepository for InMemoryIssueLogRepository {
    async fn store(&self, log: &IssueLog) -> IssueLogRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            IssueLogRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&log.id()) {
            return Err(IssueLogRepositoryError::DuplicateIssueLog(log.id()));
        }
        state.insert(log.id(), log.clone());
        Ok(())
    }

    async fn update(&self, log: &IssueLog) -> IssueLogRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            IssueLogRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&log.id()) {
            return Err(IssueLogRepositoryError::NotFound(log.id()));
        }
        state.insert(log.id(), log.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: IssueLogId) -> IssueLogRepositoryResult<Option<IssueLog>> {
        let state = self.state.read().map_err(|err| {
            IssueLogRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn find_by_source(
        &self,
        source: DocumentRef,
    ) -> IssueLogRepositoryResult<Vec<IssueLog>> {
        let state = self.state.read().map_err(|err| {
            IssueLogRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut logs: Vec<IssueLog> = state
            .values()
            .filter(|log| log.source() == source)
            .cloned()
            .collect();
        logs.sort_by_key(IssueLog::issued_at);
        Ok(logs)
    }
}
