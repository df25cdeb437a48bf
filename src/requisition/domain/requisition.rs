//! Stock requisition aggregate.

use super::{
    LineIssue, LineReturn, RequisitionDecision, RequisitionDomainError, RequisitionId,
    RequisitionLine, RequisitionLineDraft, RequisitionLineId, RequisitionStatus,
};
use crate::directory::domain::UserId;
use crate::sequence::domain::{CategoryRef, DocumentCode};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Internal request to draw stock from existing inventory.
///
/// Moves `Pending → Approved → Issued → Returned`, with `Rejected` as the
/// alternative outcome of the approval decision. Content may only be
/// amended while pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requisition {
    id: RequisitionId,
    code: DocumentCode,
    category: CategoryRef,
    required_by: NaiveDate,
    lines: Vec<RequisitionLine>,
    requested_by: UserId,
    approved_by: Option<UserId>,
    issued_by: Option<UserId>,
    decided_at: Option<DateTime<Utc>>,
    issued_at: Option<DateTime<Utc>>,
    status: RequisitionStatus,
    remark: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a requisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequisitionParams {
    /// Budget head the requisition draws on.
    pub category: CategoryRef,
    /// Date the stock is required by.
    pub required_by: NaiveDate,
    /// Requested line items.
    pub lines: Vec<RequisitionLineDraft>,
    /// Account raising the requisition.
    pub requested_by: UserId,
    /// Optional requester remark.
    pub remark: Option<String>,
}

/// Parameter object for amending a pending requisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmendRequisitionParams {
    /// Replacement budget head.
    pub category: CategoryRef,
    /// Replacement required date.
    pub required_by: NaiveDate,
    /// Replacement line items.
    pub lines: Vec<RequisitionLineDraft>,
    /// Replacement remark.
    pub remark: Option<String>,
}

/// Parameter object for reconstructing a persisted requisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRequisitionData {
    /// Persisted requisition identifier.
    pub id: RequisitionId,
    /// Persisted requisition code.
    pub code: DocumentCode,
    /// Persisted budget head reference.
    pub category: CategoryRef,
    /// Persisted required date.
    pub required_by: NaiveDate,
    /// Persisted line items.
    pub lines: Vec<RequisitionLine>,
    /// Persisted requester.
    pub requested_by: UserId,
    /// Persisted approver.
    pub approved_by: Option<UserId>,
    /// Persisted issuer.
    pub issued_by: Option<UserId>,
    /// Persisted decision timestamp.
    pub decided_at: Option<DateTime<Utc>>,
    /// Persisted issue timestamp.
    pub issued_at: Option<DateTime<Utc>>,
    /// Persisted status.
    pub status: RequisitionStatus,
    /// Persisted remark.
    pub remark: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

fn validated_lines(
    drafts: Vec<RequisitionLineDraft>,
) -> Result<Vec<RequisitionLine>, RequisitionDomainError> {
    if drafts.is_empty() {
        return Err(RequisitionDomainError::EmptyLines);
    }
    drafts.into_iter().map(RequisitionLine::from_draft).collect()
}

fn validated_required_date(
    required_by: NaiveDate,
    clock: &impl Clock,
) -> Result<NaiveDate, RequisitionDomainError> {
    let today = clock.utc().date_naive();
    if required_by < today {
        return Err(RequisitionDomainError::PastRequiredDate {
            required: required_by,
            today,
        });
    }
    Ok(required_by)
}

impl Requisition {
    /// Creates a pending requisition under the given document code.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionDomainError::PastRequiredDate`] when the
    /// required date lies before today,
    /// [`RequisitionDomainError::EmptyLines`] for an empty line list, and
    /// line validation errors for invalid drafts.
    pub fn new(
        code: DocumentCode,
        params: RequisitionParams,
        clock: &impl Clock,
    ) -> Result<Self, RequisitionDomainError> {
        let required_by = validated_required_date(params.required_by, clock)?;
        let lines = validated_lines(params.lines)?;

        let timestamp = clock.utc();
        Ok(Self {
            id: RequisitionId::new(),
            code,
            category: params.category,
            required_by,
            lines,
            requested_by: params.requested_by,
            approved_by: None,
            issued_by: None,
            decided_at: None,
            issued_at: None,
            status: RequisitionStatus::Pending,
            remark: params.remark,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a requisition from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRequisitionData) -> Self {
        Self {
            id: data.id,
            code: data.code,
            category: data.category,
            required_by: data.required_by,
            lines: data.lines,
            requested_by: data.requested_by,
            approved_by: data.approved_by,
            issued_by: data.issued_by,
            decided_at: data.decided_at,
            issued_at: data.issued_at,
            status: data.status,
            remark: data.remark,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Replaces the requisition content while it is still pending.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionDomainError::NotEditable`] once the requisition
    /// has left `Pending`, plus the same validation errors as [`Self::new`].
    pub fn amend(
        &mut self,
        params: AmendRequisitionParams,
        clock: &impl Clock,
    ) -> Result<(), RequisitionDomainError> {
        if self.status != RequisitionStatus::Pending {
            return Err(RequisitionDomainError::NotEditable {
                status: self.status,
            });
        }
        let required_by = validated_required_date(params.required_by, clock)?;
        let lines = validated_lines(params.lines)?;

        self.category = params.category;
        self.required_by = required_by;
        self.lines = lines;
        self.remark = params.remark;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Checks that the requisition may still be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionDomainError::NotEditable`] once the requisition
    /// has left `Pending`.
    pub const fn ensure_deletable(&self) -> Result<(), RequisitionDomainError> {
        match self.status {
            RequisitionStatus::Pending => Ok(()),
            status => Err(RequisitionDomainError::NotEditable { status }),
        }
    }

    /// Applies an approval decision.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionDomainError::InvalidTransition`] unless the
    /// requisition is pending.
    pub fn decide(
        &mut self,
        decision: RequisitionDecision,
        approver: UserId,
        remark: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), RequisitionDomainError> {
        let target = decision.target_status();
        if !self.status.can_transition_to(target) {
            return Err(RequisitionDomainError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        let timestamp = clock.utc();
        self.status = target;
        self.approved_by = Some(approver);
        self.decided_at = Some(timestamp);
        self.remark = remark;
        self.updated_at = timestamp;
        Ok(())
    }

    /// Records per-line issued quantities and marks the requisition issued.
    ///
    /// Validation completes before any line is touched, so a rejected call
    /// leaves the requisition unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionDomainError::InvalidTransition`] unless the
    /// requisition is approved, [`RequisitionDomainError::EmptyLines`] for
    /// an empty issue list, [`RequisitionDomainError::UnknownLine`] for a
    /// line not on the requisition, and
    /// [`RequisitionDomainError::ZeroQuantity`] for a zero quantity.
    pub fn issue_lines(
        &mut self,
        issues: &[LineIssue],
        issuer: UserId,
        clock: &impl Clock,
    ) -> Result<(), RequisitionDomainError> {
        if !self.status.can_transition_to(RequisitionStatus::Issued) {
            return Err(RequisitionDomainError::InvalidTransition {
                from: self.status,
                to: RequisitionStatus::Issued,
            });
        }
        if issues.is_empty() {
            return Err(RequisitionDomainError::EmptyLines);
        }
        for issue in issues {
            if issue.quantity == 0 {
                return Err(RequisitionDomainError::ZeroQuantity);
            }
            if !self.lines.iter().any(|line| line.id() == issue.line) {
                return Err(RequisitionDomainError::UnknownLine(issue.line));
            }
        }

        for issue in issues {
            if let Some(line) = self.lines.iter_mut().find(|line| line.id() == issue.line) {
                line.record_issue(issue.quantity);
            }
        }
        let timestamp = clock.utc();
        self.status = RequisitionStatus::Issued;
        self.issued_by = Some(issuer);
        self.issued_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Records per-line returns and closes the requisition.
    ///
    /// Validation completes before any line is touched, so a rejected call
    /// leaves the requisition unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionDomainError::InvalidTransition`] unless the
    /// requisition is issued, [`RequisitionDomainError::EmptyReturn`] for an
    /// empty return list, [`RequisitionDomainError::ZeroQuantity`] for a
    /// line returning nothing, [`RequisitionDomainError::UnknownLine`] for a
    /// line not on the requisition, and
    /// [`RequisitionDomainError::ReturnExceedsIssued`] when a line accounts
    /// for more than was issued.
    pub fn record_returns(
        &mut self,
        returns: &[LineReturn],
        clock: &impl Clock,
    ) -> Result<(), RequisitionDomainError> {
        if !self.status.can_transition_to(RequisitionStatus::Returned) {
            return Err(RequisitionDomainError::InvalidTransition {
                from: self.status,
                to: RequisitionStatus::Returned,
            });
        }
        if returns.is_empty() {
            return Err(RequisitionDomainError::EmptyReturn);
        }
        for entry in returns {
            if entry.returned == 0 {
                return Err(RequisitionDomainError::ZeroQuantity);
            }
            let line = self
                .lines
                .iter()
                .find(|line| line.id() == entry.line)
                .ok_or(RequisitionDomainError::UnknownLine(entry.line))?;
            let issued = line.quantity_issued().unwrap_or(0);
            let over = entry
                .returned
                .checked_add(entry.lost_or_damaged)
                .is_none_or(|accounted| accounted > issued);
            if over {
                return Err(RequisitionDomainError::ReturnExceedsIssued {
                    line: entry.line,
                    issued,
                    returned: entry.returned,
                    lost_or_damaged: entry.lost_or_damaged,
                });
            }
        }

        for entry in returns {
            if let Some(line) = self.lines.iter_mut().find(|line| line.id() == entry.line) {
                line.record_return(entry.returned, entry.lost_or_damaged)?;
            }
        }
        self.status = RequisitionStatus::Returned;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Returns the requisition identifier.
    #[must_use]
    pub const fn id(&self) -> RequisitionId {
        self.id
    }

    /// Returns the requisition code.
    #[must_use]
    pub const fn code(&self) -> &DocumentCode {
        &self.code
    }

    /// Returns the budget head reference.
    #[must_use]
    pub const fn category(&self) -> CategoryRef {
        self.category
    }

    /// Returns the required date.
    #[must_use]
    pub const fn required_by(&self) -> NaiveDate {
        self.required_by
    }

    /// Returns the line items.
    #[must_use]
    pub fn lines(&self) -> &[RequisitionLine] {
        &self.lines
    }

    /// Returns the line with the given identifier, if present.
    #[must_use]
    pub fn line(&self, id: RequisitionLineId) -> Option<&RequisitionLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Returns the requesting account.
    #[must_use]
    pub const fn requested_by(&self) -> UserId {
        self.requested_by
    }

    /// Returns the approving account, once decided.
    #[must_use]
    pub const fn approved_by(&self) -> Option<UserId> {
        self.approved_by
    }

    /// Returns the issuing account, once issued.
    #[must_use]
    pub const fn issued_by(&self) -> Option<UserId> {
        self.issued_by
    }

    /// Returns the decision timestamp, once decided.
    #[must_use]
    pub const fn decided_at(&self) -> Option<DateTime<Utc>> {
        self.decided_at
    }

    /// Returns the issue timestamp, once issued.
    #[must_use]
    pub const fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> RequisitionStatus {
        self.status
    }

    /// Returns the requisition-level remark.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
