//! Domain model for the departmental user directory.
//!
//! Accounts, roles, and e-mail addresses used to resolve role-addressed
//! notifications to concrete recipients.

mod account;
mod email;
mod error;
mod ids;
mod role;

pub use account::{PersistedAccountData, UserAccount};
pub use email::EmailAddress;
pub use error::{DirectoryDomainError, ParseRoleError};
pub use ids::UserId;
pub use role::Role;
