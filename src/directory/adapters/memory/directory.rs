//! In-memory user directory for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::{
    domain::{EmailAddress, Role, UserAccount, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    accounts: HashMap<UserId, UserAccount>,
    email_index: HashMap<EmailAddress, UserId>,
}

impl InMemoryUserDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn store(&self, account: &UserAccount) -> UserDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.accounts.contains_key(&account.id()) {
            return Err(UserDirectoryError::DuplicateAccount(account.id()));
        }
        if state.email_index.contains_key(account.email()) {
            return Err(UserDirectoryError::DuplicateEmail(account.email().clone()));
        }

        state
            .email_index
            .insert(account.email().clone(), account.id());
        state.accounts.insert(account.id(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserAccount>> {
        let state = self.state.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.accounts.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> UserDirectoryResult<Option<UserAccount>> {
        let state = self.state.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let account = state
            .email_index
            .get(email)
            .and_then(|id| state.accounts.get(id))
            .cloned();
        Ok(account)
    }

    async fn emails_with_role(&self, role: Role) -> UserDirectoryResult<Vec<EmailAddress>> {
        let state = self.state.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut emails: Vec<EmailAddress> = state
            .accounts
            .values()
            .filter(|account| account.has_role(role))
            .map(|account| account.email().clone())
            .collect();
        emails.sort();
        Ok(emails)
    }
}
