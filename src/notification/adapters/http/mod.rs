//! HTTP adapters for notification dispatch.

mod mailer;

pub use mailer::{HttpRelayMailer, MailRelayConfig};
