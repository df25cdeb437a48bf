//! In-memory adapters for notification persistence and dispatch.

mod mailer;
mod repository;

pub use mailer::RecordingMailer;
pub use repository::InMemoryNotificationRepository;
