//! Purchase request document flavours.

use crate::notification::domain::NotificationKind;
use crate::sequence::domain::DocumentKind;

use super::ParsePurchaseRequestKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects which of the two purchase request documents an aggregate models.
///
/// The original system keeps new indents and order requests as separate,
/// near-identical documents; here one aggregate carries both, with the kind
/// choosing the code tag and the notification vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseRequestKind {
    /// A new indent, coded `NI-`.
    NewIndent,
    /// An order request, coded `O-`.
    OrderRequest,
}

impl PurchaseRequestKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewIndent => "new_indent",
            Self::OrderRequest => "order_request",
        }
    }

    /// Returns the name used in notification titles and messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::NewIndent => "New Indent",
            Self::OrderRequest => "Order Request",
        }
    }

    /// Returns the document kind whose sequence numbers this flavour draws.
    #[must_use]
    pub const fn document_kind(self) -> DocumentKind {
        match self {
            Self::NewIndent => DocumentKind::Indent,
            Self::OrderRequest => DocumentKind::OrderRequest,
        }
    }

    /// Notification kind raised when a request of this flavour is created.
    #[must_use]
    pub const fn created_kind(self) -> NotificationKind {
        match self {
            Self::NewIndent => NotificationKind::IndentCreated,
            Self::OrderRequest => NotificationKind::OrderRequestCreated,
        }
    }

    /// Notification kind raised when a request of this flavour is amended.
    #[must_use]
    pub const fn updated_kind(self) -> NotificationKind {
        match self {
            Self::NewIndent => NotificationKind::IndentUpdated,
            Self::OrderRequest => NotificationKind::OrderRequestUpdated,
        }
    }

    /// Notification kind raised when a request of this flavour is deleted.
    #[must_use]
    pub const fn deleted_kind(self) -> NotificationKind {
        match self {
            Self::NewIndent => NotificationKind::IndentDeleted,
            Self::OrderRequest => NotificationKind::OrderRequestDeleted,
        }
    }

    /// Notification kind raised when a request of this flavour is approved.
    #[must_use]
    pub const fn approved_kind(self) -> NotificationKind {
        match self {
            Self::NewIndent => NotificationKind::IndentApproved,
            Self::OrderRequest => NotificationKind::OrderRequestApproved,
        }
    }

    /// Notification kind raised when a request of this flavour is rejected.
    #[must_use]
    pub const fn rejected_kind(self) -> NotificationKind {
        match self {
            Self::NewIndent => NotificationKind::IndentRejected,
            Self::OrderRequest => NotificationKind::OrderRequestRejected,
        }
    }

    /// Notification kind raised when a request of this flavour is ordered.
    #[must_use]
    pub const fn ordered_kind(self) -> NotificationKind {
        match self {
            Self::NewIndent => NotificationKind::IndentOrdered,
            Self::OrderRequest => NotificationKind::OrderRequestOrdered,
        }
    }

    /// Notification kind raised when a request of this flavour is issued.
    #[must_use]
    pub const fn issued_kind(self) -> NotificationKind {
        match self {
            Self::NewIndent => NotificationKind::IndentIssued,
            Self::OrderRequest => NotificationKind::OrderRequestIssued,
        }
    }
}

impl TryFrom<&str> for PurchaseRequestKind {
    type Error = ParsePurchaseRequestKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "new_indent" => Ok(Self::NewIndent),
            "order_request" => Ok(Self::OrderRequest),
            _ => Err(ParsePurchaseRequestKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for PurchaseRequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
