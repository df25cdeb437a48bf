//! Cross-context references to workflow documents and budget categories.

use super::{CategoryKind, DocumentKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Points at a workflow document by kind and identifier.
///
/// Notifications use it to link feed entries back to the document that
/// raised them; issue logs use it to record which document stock was
/// issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    kind: DocumentKind,
    id: Uuid,
}

impl DocumentRef {
    /// Creates a document reference.
    #[must_use]
    pub const fn new(kind: DocumentKind, id: Uuid) -> Self {
        Self { kind, id }
    }

    /// Returns the referenced document kind.
    #[must_use]
    pub const fn kind(self) -> DocumentKind {
        self.kind
    }

    /// Returns the referenced document identifier.
    #[must_use]
    pub const fn id(self) -> Uuid {
        self.id
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// Points at the budget head a workflow document is raised against.
///
/// The identifier refers to the concrete budget record (project, practical
/// course, and so on) held outside this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    kind: CategoryKind,
    id: Uuid,
}

impl CategoryRef {
    /// Creates a budget category reference.
    #[must_use]
    pub const fn new(kind: CategoryKind, id: Uuid) -> Self {
        Self { kind, id }
    }

    /// Returns the budget category kind.
    #[must_use]
    pub const fn kind(self) -> CategoryKind {
        self.kind
    }

    /// Returns the budget record identifier.
    #[must_use]
    pub const fn id(self) -> Uuid {
        self.id
    }
}

impl fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}
