//! Purchase order aggregate.

use super::{
    MAX_NOTES_LENGTH, Money, OrderDecision, OrderLine, OrderLineDraft, OrderStatus,
    OrderingDomainError, PurchaseOrderId, VendorId,
};
use crate::directory::domain::UserId;
use crate::sequence::domain::{CategoryRef, DocumentCode, OrderNumber};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Approved purchase order placed with a vendor.
///
/// Carries two generated numbers: the monthly `PO-` document code and the
/// category/financial-year order number printed on vendor paperwork. Moves
/// `Pending → Approved → Placed → Received`, with `Rejected` as the
/// alternative outcome of the approval decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    id: PurchaseOrderId,
    po_number: DocumentCode,
    order_number: OrderNumber,
    category: CategoryRef,
    vendor: VendorId,
    quotation_ref: String,
    quotation_date: NaiveDate,
    lines: Vec<OrderLine>,
    total_cost: Money,
    total_gst: Money,
    grand_total: Money,
    notes: Option<String>,
    created_by: UserId,
    approved_by: Option<UserId>,
    decided_at: Option<DateTime<Utc>>,
    status: OrderStatus,
    remark: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a purchase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrderParams {
    /// Budget head the order draws on.
    pub category: CategoryRef,
    /// Vendor the order is placed with.
    pub vendor: VendorId,
    /// Reference number of the vendor quotation.
    pub quotation_ref: String,
    /// Date of the vendor quotation.
    pub quotation_date: NaiveDate,
    /// Priced line items.
    pub lines: Vec<OrderLineDraft>,
    /// Declared total of the line costs.
    pub total_cost: Money,
    /// Declared GST across the order.
    pub total_gst: Money,
    /// Declared grand total (cost plus GST).
    pub grand_total: Money,
    /// Free-form order notes, at most 100 characters.
    pub notes: Option<String>,
    /// Account raising the order.
    pub created_by: UserId,
}

/// Parameter object for reconstructing a persisted purchase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPurchaseOrderData {
    /// Persisted order identifier.
    pub id: PurchaseOrderId,
    /// Persisted monthly document code.
    pub po_number: DocumentCode,
    /// Persisted financial-year order number.
    pub order_number: OrderNumber,
    /// Persisted budget head reference.
    pub category: CategoryRef,
    /// Persisted vendor reference.
    pub vendor: VendorId,
    /// Persisted quotation reference.
    pub quotation_ref: String,
    /// Persisted quotation date.
    pub quotation_date: NaiveDate,
    /// Persisted line items.
    pub lines: Vec<OrderLine>,
    /// Persisted total cost.
    pub total_cost: Money,
    /// Persisted total GST.
    pub total_gst: Money,
    /// Persisted grand total.
    pub grand_total: Money,
    /// Persisted order notes.
    pub notes: Option<String>,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted approver.
    pub approved_by: Option<UserId>,
    /// Persisted decision timestamp.
    pub decided_at: Option<DateTime<Utc>>,
    /// Persisted status.
    pub status: OrderStatus,
    /// Persisted remark.
    pub remark: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

fn validated_lines(drafts: Vec<OrderLineDraft>) -> Result<Vec<OrderLine>, OrderingDomainError> {
    if drafts.is_empty() {
        return Err(OrderingDomainError::EmptyLines);
    }
    let mut seen = HashSet::new();
    for draft in &drafts {
        if !seen.insert(draft.entry_number) {
            return Err(OrderingDomainError::DuplicateEntryNumber(draft.entry_number));
        }
    }
    drafts.into_iter().map(OrderLine::from_draft).collect()
}

fn validated_totals(
    lines: &[OrderLine],
    total_cost: Money,
    total_gst: Money,
    grand_total: Money,
) -> Result<(), OrderingDomainError> {
    let mut line_sum = Money::ZERO;
    for line in lines {
        line_sum = line_sum
            .checked_add(line.cost())
            .ok_or(OrderingDomainError::AmountOutOfRange)?;
    }
    if line_sum != total_cost {
        return Err(OrderingDomainError::TotalCostMismatch {
            expected: line_sum,
            declared: total_cost,
        });
    }
    let expected_grand = total_cost
        .checked_add(total_gst)
        .ok_or(OrderingDomainError::AmountOutOfRange)?;
    if expected_grand != grand_total {
        return Err(OrderingDomainError::GrandTotalMismatch {
            expected: expected_grand,
            declared: grand_total,
        });
    }
    Ok(())
}

fn validated_notes(notes: Option<String>) -> Result<Option<String>, OrderingDomainError> {
    let trimmed = notes
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty());
    if let Some(text) = &trimmed {
        let length = text.chars().count();
        if length > MAX_NOTES_LENGTH {
            return Err(OrderingDomainError::NotesTooLong { length });
        }
    }
    Ok(trimmed)
}

impl PurchaseOrder {
    /// Creates a pending purchase order under the given generated numbers.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingDomainError::EmptyLines`] for an empty line list,
    /// [`OrderingDomainError::EmptyQuotationRef`] for a blank quotation
    /// reference, [`OrderingDomainError::NotesTooLong`] for over-long
    /// notes, line validation errors for invalid drafts, and
    /// [`OrderingDomainError::TotalCostMismatch`] or
    /// [`OrderingDomainError::GrandTotalMismatch`] when the declared
    /// totals do not add up.
    pub fn new(
        po_number: DocumentCode,
        order_number: OrderNumber,
        params: PurchaseOrderParams,
        clock: &impl Clock,
    ) -> Result<Self, OrderingDomainError> {
        let quotation_ref = params.quotation_ref.trim().to_owned();
        if quotation_ref.is_empty() {
            return Err(OrderingDomainError::EmptyQuotationRef);
        }
        let lines = validated_lines(params.lines)?;
        validated_totals(&lines, params.total_cost, params.total_gst, params.grand_total)?;
        let notes = validated_notes(params.notes)?;

        let timestamp = clock.utc();
        Ok(Self {
            id: PurchaseOrderId::new(),
            po_number,
            order_number,
            category: params.category,
            vendor: params.vendor,
            quotation_ref,
            quotation_date: params.quotation_date,
            lines,
            total_cost: params.total_cost,
            total_gst: params.total_gst,
            grand_total: params.grand_total,
            notes,
            created_by: params.created_by,
            approved_by: None,
            decided_at: None,
            status: OrderStatus::Pending,
            remark: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a purchase order from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPurchaseOrderData) -> Self {
        Self {
            id: data.id,
            po_number: data.po_number,
            order_number: data.order_number,
            category: data.category,
            vendor: data.vendor,
            quotation_ref: data.quotation_ref,
            quotation_date: data.quotation_date,
            lines: data.lines,
            total_cost: data.total_cost,
            total_gst: data.total_gst,
            grand_total: data.grand_total,
            notes: data.notes,
            created_by: data.created_by,
            approved_by: data.approved_by,
            decided_at: data.decided_at,
            status: data.status,
            remark: data.remark,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Applies an approval decision, recording the approver and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingDomainError::InvalidOrderTransition`] unless the
    /// order is pending.
    pub fn decide(
        &mut self,
        decision: OrderDecision,
        approver: UserId,
        remark: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), OrderingDomainError> {
        let target = decision.target_status();
        if !self.status.can_transition_to(target) {
            return Err(OrderingDomainError::InvalidOrderTransition {
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

    /// Records that the approved order was sent to the vendor.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingDomainError::InvalidOrderTransition`] unless the
    /// order is approved.
    pub fn mark_placed(
        &mut self,
        remark: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), OrderingDomainError> {
        self.transition(OrderStatus::Placed, remark, clock)
    }

    /// Records that the goods arrived, closing the order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingDomainError::InvalidOrderTransition`] unless the
    /// order is placed.
    pub fn mark_received(
        &mut self,
        remark: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), OrderingDomainError> {
        self.transition(OrderStatus::Received, remark, clock)
    }

    fn transition(
        &mut self,
        target: OrderStatus,
        remark: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), OrderingDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(OrderingDomainError::InvalidOrderTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        if remark.is_some() {
            self.remark = remark;
        }
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Returns the order identifier.
    #[must_use]
    pub const fn id(&self) -> PurchaseOrderId {
        self.id
    }

    /// Returns the monthly document code.
    #[must_use]
    pub const fn po_number(&self) -> &DocumentCode {
        &self.po_number
    }

    /// Returns the financial-year order number.
    #[must_use]
    pub const fn order_number(&self) -> &OrderNumber {
        &self.order_number
    }

    /// Returns the budget head reference.
    #[must_use]
    pub const fn category(&self) -> CategoryRef {
        self.category
    }

    /// Returns the vendor reference.
    #[must_use]
    pub const fn vendor(&self) -> VendorId {
        self.vendor
    }

    /// Returns the vendor quotation reference.
    #[must_use]
    pub fn quotation_ref(&self) -> &str {
        &self.quotation_ref
    }

    /// Returns the vendor quotation date.
    #[must_use]
    pub const fn quotation_date(&self) -> NaiveDate {
        self.quotation_date
    }

    /// Returns the priced line items.
    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Returns the total of the line costs.
    #[must_use]
    pub const fn total_cost(&self) -> Money {
        self.total_cost
    }

    /// Returns the GST across the order.
    #[must_use]
    pub const fn total_gst(&self) -> Money {
        self.total_gst
    }

    /// Returns the grand total.
    #[must_use]
    pub const fn grand_total(&self) -> Money {
        self.grand_total
    }

    /// Returns the order notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the creating account.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the approving account, once decided.
    #[must_use]
    pub const fn approved_by(&self) -> Option<UserId> {
        self.approved_by
    }

    /// Returns the decision timestamp, once decided.
    #[must_use]
    pub const fn decided_at(&self) -> Option<DateTime<Utc>> {
        self.decided_at
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the order-level remark.
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
