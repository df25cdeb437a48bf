//! Purchase request aggregate.

use super::{
    IndentDomainError, PurchaseRequestDecision, PurchaseRequestId, PurchaseRequestKind,
    PurchaseRequestLine, PurchaseRequestLineDraft, PurchaseRequestStatus,
};
use crate::directory::domain::UserId;
use crate::sequence::domain::{CategoryRef, DocumentCode};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Internal request to purchase items not drawn from existing stock.
///
/// Covers both new indents and order requests; the kind only varies the
/// generated code tag and the notification vocabulary. Moves
/// `Pending → Approved → Ordered → Issued`, with `Rejected` as the
/// alternative outcome of the approval decision. Content may only be
/// amended while pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    id: PurchaseRequestId,
    code: DocumentCode,
    kind: PurchaseRequestKind,
    category: CategoryRef,
    required_by: NaiveDate,
    lines: Vec<PurchaseRequestLine>,
    requested_by: UserId,
    approved_by: Option<UserId>,
    ordered_by: Option<UserId>,
    decided_at: Option<DateTime<Utc>>,
    ordered_at: Option<DateTime<Utc>>,
    status: PurchaseRequestStatus,
    remark: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a purchase request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequestParams {
    /// Document flavour being raised.
    pub kind: PurchaseRequestKind,
    /// Budget head the purchase draws on.
    pub category: CategoryRef,
    /// Date the items are required by.
    pub required_by: NaiveDate,
    /// Requested line items.
    pub lines: Vec<PurchaseRequestLineDraft>,
    /// Account raising the request.
    pub requested_by: UserId,
    /// Optional requester remark.
    pub remark: Option<String>,
}

/// Parameter object for amending a pending purchase request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmendPurchaseRequestParams {
    /// Replacement budget head.
    pub category: CategoryRef,
    /// Replacement required date.
    pub required_by: NaiveDate,
    /// Replacement line items.
    pub lines: Vec<PurchaseRequestLineDraft>,
    /// Replacement remark.
    pub remark: Option<String>,
}

/// Parameter object for reconstructing a persisted purchase request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPurchaseRequestData {
    /// Persisted request identifier.
    pub id: PurchaseRequestId,
    /// Persisted request code.
    pub code: DocumentCode,
    /// Persisted document flavour.
    pub kind: PurchaseRequestKind,
    /// Persisted budget head reference.
    pub category: CategoryRef,
    /// Persisted required date.
    pub required_by: NaiveDate,
    /// Persisted line items.
    pub lines: Vec<PurchaseRequestLine>,
    /// Persisted requester.
    pub requested_by: UserId,
    /// Persisted approver.
    pub approved_by: Option<UserId>,
    /// Persisted ordering account.
    pub ordered_by: Option<UserId>,
    /// Persisted decision timestamp.
    pub decided_at: Option<DateTime<Utc>>,
    /// Persisted ordering timestamp.
    pub ordered_at: Option<DateTime<Utc>>,
    /// Persisted status.
    pub status: PurchaseRequestStatus,
    /// Persisted remark.
    pub remark: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

fn validated_lines(
    drafts: Vec<PurchaseRequestLineDraft>,
) -> Result<Vec<PurchaseRequestLine>, IndentDomainError> {
    if drafts.is_empty() {
        return Err(IndentDomainError::EmptyLines);
    }
    drafts
        .into_iter()
        .map(PurchaseRequestLine::from_draft)
        .collect()
}

fn validated_required_date(
    required_by: NaiveDate,
    clock: &impl Clock,
) -> Result<NaiveDate, IndentDomainError> {
    let today = clock.utc().date_naive();
    if required_by < today {
        return Err(IndentDomainError::PastRequiredDate {
            required: required_by,
            today,
        });
    }
    Ok(required_by)
}

impl PurchaseRequest {
    /// Creates a pending purchase request under the given document code.
    ///
    /// # Errors
    ///
    /// Returns [`IndentDomainError::PastRequiredDate`] when the required
    /// date lies before today, [`IndentDomainError::EmptyLines`] for an
    /// empty line list, and line validation errors for invalid drafts.
    pub fn new(
        code: DocumentCode,
        params: PurchaseRequestParams,
        clock: &impl Clock,
    ) -> Result<Self, IndentDomainError> {
        let required_by = validated_required_date(params.required_by, clock)?;
        let lines = validated_lines(params.lines)?;

        let timestamp = clock.utc();
        Ok(Self {
            id: PurchaseRequestId::new(),
            code,
            kind: params.kind,
            category: params.category,
            required_by,
            lines,
            requested_by: params.requested_by,
            approved_by: None,
            ordered_by: None,
            decided_at: None,
            ordered_at: None,
            status: PurchaseRequestStatus::Pending,
            remark: params.remark,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a purchase request from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPurchaseRequestData) -> Self {
        Self {
            id: data.id,
            code: data.code,
            kind: data.kind,
            category: data.category,
            required_by: data.required_by,
            lines: data.lines,
            requested_by: data.requested_by,
            approved_by: data.approved_by,
            ordered_by: data.ordered_by,
            decided_at: data.decided_at,
            ordered_at: data.ordered_at,
            status: data.status,
            remark: data.remark,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Replaces the request content while it is still pending.
    ///
    /// # Errors
    ///
    /// Returns [`IndentDomainError::NotEditable`] once the request has left
    /// `Pending`, plus the same validation errors as [`Self::new`].
    pub fn amend(
        &mut self,
        params: AmendPurchaseRequestParams,
        clock: &impl Clock,
    ) -> Result<(), IndentDomainError> {
        if self.status != PurchaseRequestStatus::Pending {
            return Err(IndentDomainError::NotEditable {
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

    /// Checks that the request may still be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`IndentDomainError::NotEditable`] once the request has left
    /// `Pending`.
    pub const fn ensure_deletable(&self) -> Result<(), IndentDomainError> {
        match self.status {
            PurchaseRequestStatus::Pending => Ok(()),
            status => Err(IndentDomainError::NotEditable { status }),
        }
    }

    /// Applies an approval decision.
    ///
    /// # Errors
    ///
    /// Returns [`IndentDomainError::InvalidTransition`] unless the request
    /// is pending.
    pub fn decide(
        &mut self,
        decision: PurchaseRequestDecision,
        approver: UserId,
        remark: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), IndentDomainError> {
        let target = decision.target_status();
        if !self.status.can_transition_to(target) {
            return Err(IndentDomainError::InvalidTransition {
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

    /// Records that an order was raised against the approved request.
    ///
    /// # Errors
    ///
    /// Returns [`IndentDomainError::InvalidTransition`] unless the request
    /// is approved.
    pub fn mark_ordered(
        &mut self,
        orderer: UserId,
        clock: &impl Clock,
    ) -> Result<(), IndentDomainError> {
        if !self
            .status
            .can_transition_to(PurchaseRequestStatus::Ordered)
        {
            return Err(IndentDomainError::InvalidTransition {
                from: self.status,
                to: PurchaseRequestStatus::Ordered,
            });
        }

        let timestamp = clock.utc();
        self.status = PurchaseRequestStatus::Ordered;
        self.ordered_by = Some(orderer);
        self.ordered_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Records that the ordered items were handed over, closing the request.
    ///
    /// # Errors
    ///
    /// Returns [`IndentDomainError::InvalidTransition`] unless the request
    /// is ordered.
    pub fn mark_issued(&mut self, clock: &impl Clock) -> Result<(), IndentDomainError> {
        if !self.status.can_transition_to(PurchaseRequestStatus::Issued) {
            return Err(IndentDomainError::InvalidTransition {
                from: self.status,
                to: PurchaseRequestStatus::Issued,
            });
        }

        self.status = PurchaseRequestStatus::Issued;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> PurchaseRequestId {
        self.id
    }

    /// Returns the request code.
    #[must_use]
    pub const fn code(&self) -> &DocumentCode {
        &self.code
    }

    /// Returns the document flavour.
    #[must_use]
    pub const fn kind(&self) -> PurchaseRequestKind {
        self.kind
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
    pub fn lines(&self) -> &[PurchaseRequestLine] {
        &self.lines
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

    /// Returns the ordering account, once ordered.
    #[must_use]
    pub const fn ordered_by(&self) -> Option<UserId> {
        self.ordered_by
    }

    /// Returns the decision timestamp, once decided.
    #[must_use]
    pub const fn decided_at(&self) -> Option<DateTime<Utc>> {
        self.decided_at
    }

    /// Returns the ordering timestamp, once ordered.
    #[must_use]
    pub const fn ordered_at(&self) -> Option<DateTime<Utc>> {
        self.ordered_at
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> PurchaseRequestStatus {
        self.status
    }

    /// Returns the request-level remark.
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
