//! Service layer for the notification context.

mod fanout;
mod templates;

pub use fanout::{
    NotificationFanout, NotificationFanoutError, NotificationFanoutResult, NotificationPublisher,
    PublishNotificationRequest, SenderIdentity,
};
pub use templates::{EmailTemplates, TemplateRenderError};
