//! Purchase request line items.

use super::{IndentDomainError, PurchaseRequestLineId};
use crate::inventory::domain::ItemClass;
use serde::{Deserialize, Serialize};

/// A single item asked for on a purchase request.
///
/// Unlike requisition lines, these are free-form: the item may not exist in
/// the stores catalogue yet, so the line carries a name rather than a stock
/// reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequestLine {
    id: PurchaseRequestLineId,
    item_name: String,
    class: ItemClass,
    unit: String,
    quantity: u32,
    description: Option<String>,
    technical_details: Option<String>,
    remark: Option<String>,
}

/// Line item content supplied when creating or amending a purchase request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequestLineDraft {
    /// Name of the item to purchase.
    pub item_name: String,
    /// Class the item falls under.
    pub class: ItemClass,
    /// Unit of measure for the requested quantity.
    pub unit: String,
    /// Units requested.
    pub quantity: u32,
    /// What the item is needed for.
    pub description: Option<String>,
    /// Specifications for the vendor.
    pub technical_details: Option<String>,
    /// Optional requester remark.
    pub remark: Option<String>,
}

fn optional_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

impl PurchaseRequestLine {
    /// Validates a draft into a fresh line item.
    ///
    /// # Errors
    ///
    /// Returns [`IndentDomainError::EmptyItemName`],
    /// [`IndentDomainError::EmptyUnit`], or
    /// [`IndentDomainError::ZeroQuantity`] when the corresponding draft
    /// field is invalid.
    pub fn from_draft(draft: PurchaseRequestLineDraft) -> Result<Self, IndentDomainError> {
        let item_name = draft.item_name.trim().to_owned();
        if item_name.is_empty() {
            return Err(IndentDomainError::EmptyItemName);
        }
        let unit = draft.unit.trim().to_owned();
        if unit.is_empty() {
            return Err(IndentDomainError::EmptyUnit);
        }
        if draft.quantity == 0 {
            return Err(IndentDomainError::ZeroQuantity);
        }

        Ok(Self {
            id: PurchaseRequestLineId::new(),
            item_name,
            class: draft.class,
            unit,
            quantity: draft.quantity,
            description: optional_trimmed(draft.description),
            technical_details: optional_trimmed(draft.technical_details),
            remark: draft.remark,
        })
    }

    /// Returns the line identifier.
    #[must_use]
    pub const fn id(&self) -> PurchaseRequestLineId {
        self.id
    }

    /// Returns the requested item name.
    #[must_use]
    pub fn item_name(&self) -> &str {
        &self.item_name
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
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the line description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the technical details for the vendor.
    #[must_use]
    pub fn technical_details(&self) -> Option<&str> {
        self.technical_details.as_deref()
    }

    /// Returns the requester remark.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }
}
