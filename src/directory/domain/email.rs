//! Validated e-mail address type.

use super::DirectoryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalised, lowercased e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated e-mail address.
    ///
    /// The input is trimmed and lowercased. Basic structural checks only:
    /// exactly one `@`, a non-empty local part, and a domain containing a
    /// dot. Deliverability is the mail relay's problem.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::InvalidEmailAddress`] when the value
    /// fails the structural checks.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        let mut segments = normalized.split('@');
        let local = segments.next().unwrap_or_default();
        let domain = segments.next().unwrap_or_default();
        let has_more_segments = segments.next().is_some();

        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && !has_more_segments
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(DirectoryDomainError::InvalidEmailAddress(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
