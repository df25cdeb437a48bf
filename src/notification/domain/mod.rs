//! Domain model for role-addressed notifications.
//!
//! Notification records, kind vocabulary, and the outbound e-mail value
//! type. Dispatch and recipient resolution live in the service layer.

mod email;
mod error;
mod ids;
mod kind;
mod record;

pub use email::OutboundEmail;
pub use error::{NotificationDomainError, ParseNotificationKindError};
pub use ids::NotificationId;
pub use kind::NotificationKind;
pub use record::{Notification, NotificationParams, PersistedNotificationData};
