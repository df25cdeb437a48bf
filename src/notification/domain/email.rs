//! Outbound e-mail value type.

use crate::directory::domain::EmailAddress;
use serde::{Deserialize, Serialize};

/// A single outbound e-mail handed to the mail relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    /// Sender address.
    pub from: EmailAddress,
    /// Recipient address.
    pub to: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// Rendered message body.
    pub body: String,
}

impl OutboundEmail {
    /// Creates an outbound e-mail.
    #[must_use]
    pub fn new(
        from: EmailAddress,
        to: EmailAddress,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from,
            to,
            subject: subject.into(),
            body: body.into(),
        }
    }
}
