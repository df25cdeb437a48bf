//! Mail dispatch port.

use crate::notification::domain::OutboundEmail;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for mail dispatch operations.
pub type MailerResult<T> = Result<T, MailerError>;

/// Outbound e-mail contract.
///
/// Dispatch is best-effort: callers log failures and carry on, so
/// implementations should fail fast rather than retry.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends a single e-mail.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Rejected`] when the relay refuses the message
    /// or [`MailerError::Transport`] when it cannot be reached.
    async fn send(&self, email: &OutboundEmail) -> MailerResult<()>;
}

/// Errors returned by mailer implementations.
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    /// The relay accepted the connection but refused the message.
    #[error("mail relay rejected the message (status {status}): {reason}")]
    Rejected {
        /// HTTP status code returned by the relay.
        status: u16,
        /// Relay-supplied reason, if any.
        reason: String,
    },

    /// The relay could not be reached.
    #[error("mail transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl MailerError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
