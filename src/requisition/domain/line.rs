//! Requisition line items and per-line issue/return instructions.

use super::{RequisitionDomainError, RequisitionLineId};
use crate::inventory::domain::{ItemClass, StockItemId};
use serde::{Deserialize, Serialize};

/// A single item requested on a requisition.
///
/// Issue and return quantities stay unset until the corresponding workflow
/// steps record them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequisitionLine {
    id: RequisitionLineId,
    item: StockItemId,
    class: ItemClass,
    unit: String,
    quantity_required: u32,
    quantity_issued: Option<u32>,
    quantity_returned: Option<u32>,
    quantity_lost_damaged: Option<u32>,
    description: String,
    remark: Option<String>,
}

/// Line item content supplied when creating or amending a requisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequisitionLineDraft {
    /// Stock item the line draws from.
    pub item: StockItemId,
    /// Class of the stock item.
    pub class: ItemClass,
    /// Unit of measure for the requested quantity.
    pub unit: String,
    /// Units requested.
    pub quantity_required: u32,
    /// What the stock is needed for.
    pub description: String,
    /// Optional requester remark.
    pub remark: Option<String>,
}

/// Per-line quantity handed out at issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineIssue {
    /// Line the issue applies to.
    pub line: RequisitionLineId,
    /// Units handed out.
    pub quantity: u32,
}

/// Per-line quantities accounted for at return time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineReturn {
    /// Line the return applies to.
    pub line: RequisitionLineId,
    /// Units coming back to stock.
    pub returned: u32,
    /// Units reported lost or damaged.
    pub lost_or_damaged: u32,
}

impl RequisitionLine {
    /// Validates a draft into a fresh line item.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionDomainError::ZeroQuantity`],
    /// [`RequisitionDomainError::EmptyUnit`], or
    /// [`RequisitionDomainError::EmptyDescription`] when the corresponding
    /// draft field is invalid.
    pub fn from_draft(draft: RequisitionLineDraft) -> Result<Self, RequisitionDomainError> {
        if draft.quantity_required == 0 {
            return Err(RequisitionDomainError::ZeroQuantity);
        }
        let unit = draft.unit.trim().to_owned();
        if unit.is_empty() {
            return Err(RequisitionDomainError::EmptyUnit);
        }
        let description = draft.description.trim().to_owned();
        if description.is_empty() {
            return Err(RequisitionDomainError::EmptyDescription);
        }

        Ok(Self {
            id: RequisitionLineId::new(),
            item: draft.item,
            class: draft.class,
            unit,
            quantity_required: draft.quantity_required,
            quantity_issued: None,
            quantity_returned: None,
            quantity_lost_damaged: None,
            description,
            remark: draft.remark,
        })
    }

    /// Records the quantity handed out on this line.
    pub(crate) fn record_issue(&mut self, quantity: u32) {
        self.quantity_issued = Some(quantity);
    }

    /// Records the return split on this line.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionDomainError::ReturnExceedsIssued`] when the
    /// accounted units exceed what was issued.
    pub(crate) fn record_return(
        &mut self,
        returned: u32,
        lost_or_damaged: u32,
    ) -> Result<(), RequisitionDomainError> {
        let issued = self.quantity_issued.unwrap_or(0);
        let accounted = returned
            .checked_add(lost_or_damaged)
            .ok_or(RequisitionDomainError::ReturnExceedsIssued {
                line: self.id,
                issued,
                returned,
                lost_or_damaged,
            })?;
        if accounted > issued {
            return Err(RequisitionDomainError::ReturnExceedsIssued {
                line: self.id,
                issued,
                returned,
                lost_or_damaged,
            });
        }
        self.quantity_returned = Some(returned);
        self.quantity_lost_damaged = Some(lost_or_damaged);
        Ok(())
    }

    /// Returns the line identifier.
    #[must_use]
    pub const fn id(&self) -> RequisitionLineId {
        self.id
    }

    /// Returns the stock item reference.
    #[must_use]
    pub const fn item(&self) -> StockItemId {
        self.item
    }

    /// Returns the item class.
    #[must_use]
    pub const fn class(&self) -> ItemClass {
        self.class
    }

    /// Returns the unit of measure.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the requested quantity.
    #[must_use]
    pub const fn quantity_required(&self) -> u32 {
        self.quantity_required
    }

    /// Returns the issued quantity, once recorded.
    #[must_use]
    pub const fn quantity_issued(&self) -> Option<u32> {
        self.quantity_issued
    }

    /// Returns the returned quantity, once recorded.
    #[must_use]
    pub const fn quantity_returned(&self) -> Option<u32> {
        self.quantity_returned
    }

    /// Returns the lost-or-damaged quantity, once recorded.
    #[must_use]
    pub const fn quantity_lost_damaged(&self) -> Option<u32> {
        self.quantity_lost_damaged
    }

    /// Returns the line description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the requester remark.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }
}
