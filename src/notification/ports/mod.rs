//! Port contracts for notification persistence and dispatch.

pub mod mailer;
pub mod repository;

pub use mailer::{Mailer, MailerError, MailerResult};
pub use repository::{
    NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult,
};
