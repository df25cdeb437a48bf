//! Repository port for user directory persistence and role resolution.

use crate::directory::domain::{EmailAddress, Role, UserAccount, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User directory persistence contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Stores a new user account.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::DuplicateAccount`] when the account ID
    /// already exists or [`UserDirectoryError::DuplicateEmail`] when the
    /// e-mail address is already registered.
    async fn store(&self, account: &UserAccount) -> UserDirectoryResult<()>;

    /// Finds an account by internal identifier.
    ///
    /// Returns `None` when the account does not exist.
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserAccount>>;

    /// Finds an account by e-mail address.
    ///
    /// Returns `None` when no account has the given address.
    async fn find_by_email(&self, email: &EmailAddress)
    -> UserDirectoryResult<Option<UserAccount>>;

    /// Returns the e-mail addresses of all accounts holding the given role.
    async fn emails_with_role(&self, role: Role) -> UserDirectoryResult<Vec<EmailAddress>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// An account with the same identifier already exists.
    #[error("duplicate account identifier: {0}")]
    DuplicateAccount(UserId),

    /// An account with the same e-mail address already exists.
    #[error("duplicate e-mail address: {0}")]
    DuplicateEmail(EmailAddress),

    /// The account was not found.
    #[error("account not found: {0}")]
    NotFound(UserId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
