//! Issue log aggregate tracking stock drawn from the store.

use super::{InventoryDomainError, IssueLogId, ParseIssueLogStatusError, StockItemId};
use crate::directory::domain::EmailAddress;
use crate::sequence::domain::DocumentRef;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of an issue log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueLogStatus {
    /// Stock is out and a return is still expected.
    Outstanding,
    /// Stock was returned, possibly with losses recorded.
    Returned,
    /// Nothing is returnable; the log closed at issue time.
    Completed,
}

impl IssueLogStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outstanding => "outstanding",
            Self::Returned => "returned",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` when a log may move from this status to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(self, Self::Outstanding) && matches!(next, Self::Returned | Self::Completed)
    }
}

impl TryFrom<&str> for IssueLogStatus {
    type Error = ParseIssueLogStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "outstanding" => Ok(Self::Outstanding),
            "returned" => Ok(Self::Returned),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseIssueLogStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for IssueLogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of stock issued against a workflow document.
///
/// Consumed-on-issue classes open directly [`IssueLogStatus::Completed`];
/// everything else stays [`IssueLogStatus::Outstanding`] until the return
/// is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLog {
    id: IssueLogId,
    item: StockItemId,
    source: DocumentRef,
    issued: u32,
    returned: u32,
    lost_or_damaged: u32,
    issued_to: EmailAddress,
    issued_at: DateTime<Utc>,
    returned_at: Option<DateTime<Utc>>,
    status: IssueLogStatus,
}

/// Parameter object for reconstructing a persisted issue log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedIssueLogData {
    /// Persisted log identifier.
    pub id: IssueLogId,
    /// Persisted item reference.
    pub item: StockItemId,
    /// Persisted source document reference.
    pub source: DocumentRef,
    /// Persisted issued quantity.
    pub issued: u32,
    /// Persisted returned quantity.
    pub returned: u32,
    /// Persisted lost-or-damaged quantity.
    pub lost_or_damaged: u32,
    /// Persisted recipient address.
    pub issued_to: EmailAddress,
    /// Persisted issue timestamp.
    pub issued_at: DateTime<Utc>,
    /// Persisted return timestamp.
    pub returned_at: Option<DateTime<Utc>>,
    /// Persisted status.
    pub status: IssueLogStatus,
}

impl IssueLog {
    /// Opens an issue log for stock drawn against a document.
    ///
    /// `consumed_on_issue` closes the log immediately as
    /// [`IssueLogStatus::Completed`]; otherwise it opens
    /// [`IssueLogStatus::Outstanding`].
    ///
    /// # Errors
    ///
    /// Returns [`InventoryDomainError::ZeroQuantity`] for a zero issued
    /// quantity.
    pub fn open(
        item: StockItemId,
        source: DocumentRef,
        issued: u32,
        issued_to: EmailAddress,
        consumed_on_issue: bool,
        clock: &impl Clock,
    ) -> Result<Self, InventoryDomainError> {
        if issued == 0 {
            return Err(InventoryDomainError::ZeroQuantity);
        }
        let status = if consumed_on_issue {
            IssueLogStatus::Completed
        } else {
            IssueLogStatus::Outstanding
        };
        Ok(Self {
            id: IssueLogId::new(),
            item,
            source,
            issued,
            returned: 0,
            lost_or_damaged: 0,
            issued_to,
            issued_at: clock.utc(),
            returned_at: None,
            status,
        })
    }

    /// Reconstructs an issue log from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedIssueLogData) -> Self {
        Self {
            id: data.id,
            item: data.item,
            source: data.source,
            issued: data.issued,
            returned: data.returned,
            lost_or_damaged: data.lost_or_damaged,
            issued_to: data.issued_to,
            issued_at: data.issued_at,
            returned_at: data.returned_at,
            status: data.status,
        }
    }

    /// Closes the log with returned and lost-or-damaged quantities.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryDomainError::InvalidLogTransition`] unless the log
    /// is outstanding, [`InventoryDomainError::ZeroQuantity`] when nothing
    /// is accounted for, and [`InventoryDomainError::OverReturn`] when the
    /// accounted units exceed what was issued.
    pub fn close(
        &mut self,
        returned: u32,
        lost_or_damaged: u32,
        clock: &impl Clock,
    ) -> Result<(), InventoryDomainError> {
        if !self.status.can_transition_to(IssueLogStatus::Returned) {
            return Err(InventoryDomainError::InvalidLogTransition {
                from: self.status,
                to: IssueLogStatus::Returned,
            });
        }
        let accounted = returned
            .checked_add(lost_or_damaged)
            .ok_or(InventoryDomainError::QuantityOverflow)?;
        if accounted == 0 {
            return Err(InventoryDomainError::ZeroQuantity);
        }
        if accounted > self.issued {
            return Err(InventoryDomainError::OverReturn {
                issued: self.issued,
                returned,
                lost_or_damaged,
            });
        }

        self.returned = returned;
        self.lost_or_damaged = lost_or_damaged;
        self.returned_at = Some(clock.utc());
        self.status = IssueLogStatus::Returned;
        Ok(())
    }

    /// Returns the log identifier.
    #[must_use]
    pub const fn id(&self) -> IssueLogId {
        self.id
    }

    /// Returns the issued item reference.
    #[must_use]
    pub const fn item(&self) -> StockItemId {
        self.item
    }

    /// Returns the source document reference.
    #[must_use]
    pub const fn source(&self) -> DocumentRef {
        self.source
    }

    /// Returns the issued quantity.
    #[must_use]
    pub const fn issued(&self) -> u32 {
        self.issued
    }

    /// Returns the returned quantity.
    #[must_use]
    pub const fn returned(&self) -> u32 {
        self.returned
    }

    /// Returns the lost-or-damaged quantity.
    #[must_use]
    pub const fn lost_or_damaged(&self) -> u32 {
        self.lost_or_damaged
    }

    /// Returns the recipient address.
    #[must_use]
    pub const fn issued_to(&self) -> &EmailAddress {
        &self.issued_to
    }

    /// Returns the issue timestamp.
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Returns the return timestamp, if closed.
    #[must_use]
    pub const fn returned_at(&self) -> Option<DateTime<Utc>> {
        self.returned_at
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> IssueLogStatus {
        self.status
    }
}
