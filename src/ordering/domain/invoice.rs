//! Invoice aggregate.

use super::{
    InvoiceDecision, InvoiceId, InvoiceStatus, Money, OrderingDomainError, PurchaseOrderId,
};
use crate::directory::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Vendor invoice raised against a purchase order.
///
/// The bill number is unique across all invoices. A pending invoice may be
/// approved, rejected, or put on hold; a held invoice still awaits a final
/// approve-or-reject decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    id: InvoiceId,
    order: PurchaseOrderId,
    bill_number: u64,
    bill_date: NaiveDate,
    amount: Money,
    status: InvoiceStatus,
    created_by: UserId,
    approved_by: Option<UserId>,
    decided_at: Option<DateTime<Utc>>,
    comment: Option<String>,
    remark: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for recording a vendor invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceParams {
    /// Purchase order the invoice bills against.
    pub order: PurchaseOrderId,
    /// Vendor bill number.
    pub bill_number: u64,
    /// Date printed on the bill.
    pub bill_date: NaiveDate,
    /// Billed amount.
    pub amount: Money,
    /// Free-form comment from the recording account.
    pub comment: Option<String>,
    /// Account recording the invoice.
    pub created_by: UserId,
}

/// Parameter object for reconstructing a persisted invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedInvoiceData {
    /// Persisted invoice identifier.
    pub id: InvoiceId,
    /// Persisted purchase order reference.
    pub order: PurchaseOrderId,
    /// Persisted bill number.
    pub bill_number: u64,
    /// Persisted bill date.
    pub bill_date: NaiveDate,
    /// Persisted billed amount.
    pub amount: Money,
    /// Persisted status.
    pub status: InvoiceStatus,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted approver.
    pub approved_by: Option<UserId>,
    /// Persisted decision timestamp.
    pub decided_at: Option<DateTime<Utc>>,
    /// Persisted comment.
    pub comment: Option<String>,
    /// Persisted remark.
    pub remark: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Records a pending invoice against a purchase order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingDomainError::AmountOutOfRange`] when the billed
    /// amount is zero.
    pub fn new(params: InvoiceParams, clock: &impl Clock) -> Result<Self, OrderingDomainError> {
        if params.amount.is_zero() {
            return Err(OrderingDomainError::AmountOutOfRange);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: InvoiceId::new(),
            order: params.order,
            bill_number: params.bill_number,
            bill_date: params.bill_date,
            amount: params.amount,
            status: InvoiceStatus::Pending,
            created_by: params.created_by,
            approved_by: None,
            decided_at: None,
            comment: params
                .comment
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty()),
            remark: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an invoice from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedInvoiceData) -> Self {
        Self {
            id: data.id,
            order: data.order,
            bill_number: data.bill_number,
            bill_date: data.bill_date,
            amount: data.amount,
            status: data.status,
            created_by: data.created_by,
            approved_by: data.approved_by,
            decided_at: data.decided_at,
            comment: data.comment,
            remark: data.remark,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Applies a decision, recording the approver and timestamp.
    ///
    /// Holding an invoice keeps it open; a held invoice can still be
    /// approved or rejected later.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingDomainError::InvalidInvoiceTransition`] when the
    /// invoice has already been finally decided.
    pub fn decide(
        &mut self,
        decision: InvoiceDecision,
        approver: UserId,
        remark: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), OrderingDomainError> {
        let target = decision.target_status();
        if !self.status.can_transition_to(target) {
            return Err(OrderingDomainError::InvalidInvoiceTransition {
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

    /// Returns the invoice identifier.
    #[must_use]
    pub const fn id(&self) -> InvoiceId {
        self.id
    }

    /// Returns the purchase order the invoice bills against.
    #[must_use]
    pub const fn order(&self) -> PurchaseOrderId {
        self.order
    }

    /// Returns the vendor bill number.
    #[must_use]
    pub const fn bill_number(&self) -> u64 {
        self.bill_number
    }

    /// Returns the date printed on the bill.
    #[must_use]
    pub const fn bill_date(&self) -> NaiveDate {
        self.bill_date
    }

    /// Returns the billed amount.
    #[must_use]
    pub const fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> InvoiceStatus {
        self.status
    }

    /// Returns the recording account.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the deciding account, once decided.
    #[must_use]
    pub const fn approved_by(&self) -> Option<UserId> {
        self.approved_by
    }

    /// Returns the decision timestamp, once decided.
    #[must_use]
    pub const fn decided_at(&self) -> Option<DateTime<Utc>> {
        self.decided_at
    }

    /// Returns the comment recorded with the invoice.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the decision remark.
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
