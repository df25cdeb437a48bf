//! Recording mailer test double.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notification::{
    domain::OutboundEmail,
    ports::{Mailer, MailerError, MailerResult},
};

/// Mailer that records every message instead of sending it.
///
/// Construct with [`RecordingMailer::failing`] to simulate a relay outage
/// and exercise best-effort dispatch paths.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<RwLock<Vec<OutboundEmail>>>,
    fail_sends: bool,
}

impl RecordingMailer {
    /// Creates a mailer that accepts and records every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mailer that rejects every message.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail_sends: true,
        }
    }

    /// Returns a copy of all recorded messages in send order.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Transport`] when the record lock is poisoned.
    pub fn sent(&self) -> MailerResult<Vec<OutboundEmail>> {
        let sent = self
            .sent
            .read()
            .map_err(|err| MailerError::transport(std::io::Error::other(err.to_string())))?;
        Ok(sent.clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> MailerResult<()> {
        if self.fail_sends {
            return Err(MailerError::Rejected {
                status: 503,
                reason: "relay unavailable".to_owned(),
            });
        }
        let mut sent = self
            .sent
            .write()
            .map_err(|err| MailerError::transport(std::io::Error::other(err.to_string())))?;
        sent.push(email.clone());
        Ok(())
    }
}
