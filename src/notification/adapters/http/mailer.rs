//! HTTP mail relay adapter.
//!
//! Posts each message as JSON to a departmental mail relay endpoint. The
//! relay owns SMTP delivery; this adapter only reports whether the relay
//! accepted the message.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::notification::{
    domain::OutboundEmail,
    ports::{Mailer, MailerError, MailerResult},
};

/// Default relay request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the HTTP mail relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRelayConfig {
    endpoint: String,
    bearer_token: Option<String>,
    timeout: Duration,
}

impl MailRelayConfig {
    /// Creates a configuration for the given relay endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            bearer_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets a bearer token sent with each request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the relay endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Mailer that delivers through an HTTP relay endpoint.
#[derive(Debug, Clone)]
pub struct HttpRelayMailer {
    client: reqwest::Client,
    config: MailRelayConfig,
}

impl HttpRelayMailer {
    /// Creates a relay mailer from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: MailRelayConfig) -> MailerResult<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(config.timeout)
            .build()
            .map_err(MailerError::transport)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Mailer for HttpRelayMailer {
    async fn send(&self, email: &OutboundEmail) -> MailerResult<()> {
        let payload = json!({
            "from": email.from.as_str(),
            "to": email.to.as_str(),
            "subject": email.subject,
            "body": email.body,
        });

        let mut request = self.client.post(self.config.endpoint()).json(&payload);
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(MailerError::transport)?;
        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }
        Ok(())
    }
}
