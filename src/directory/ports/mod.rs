//! Port contracts for the user directory.

pub mod repository;

pub use repository::{UserDirectory, UserDirectoryError, UserDirectoryResult};
