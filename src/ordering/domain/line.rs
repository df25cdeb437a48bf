//! Priced purchase order line items.

use super::{Money, OrderingDomainError};
use crate::inventory::domain::{ItemClass, StockItemId};
use serde::{Deserialize, Serialize};

/// A single priced item on a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    entry_number: u32,
    description: String,
    class: ItemClass,
    item: StockItemId,
    cas_number: Option<String>,
    make: Option<String>,
    quantity: u32,
    rate: Money,
    discount_bp: u16,
    gst_bp: u16,
    cost: Money,
}

/// Line item content supplied when creating a purchase order.
///
/// The caller computes the line cost (rate, quantity, discount, GST applied
/// in its own rounding regime); the aggregate checks the declared totals
/// against the line sums rather than recomputing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineDraft {
    /// Position of the line on the printed order.
    pub entry_number: u32,
    /// Item description for the vendor.
    pub description: String,
    /// Class the item falls under.
    pub class: ItemClass,
    /// Catalogue item the line procures.
    pub item: StockItemId,
    /// CAS registry number, for chemicals.
    pub cas_number: Option<String>,
    /// Manufacturer or brand.
    pub make: Option<String>,
    /// Units ordered.
    pub quantity: u32,
    /// Quoted rate per unit.
    pub rate: Money,
    /// Discount in basis points (250 is 2.5%).
    pub discount_bp: u16,
    /// GST in basis points (1800 is 18%).
    pub gst_bp: u16,
    /// Line cost after discount, before GST.
    pub cost: Money,
}

fn optional_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

impl OrderLine {
    /// Validates a draft into a fresh line item.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingDomainError::EmptyDescription`] or
    /// [`OrderingDomainError::ZeroQuantity`] when the corresponding draft
    /// field is invalid.
    pub fn from_draft(draft: OrderLineDraft) -> Result<Self, OrderingDomainError> {
        let description = draft.description.trim().to_owned();
        if description.is_empty() {
            return Err(OrderingDomainError::EmptyDescription);
        }
        if draft.quantity == 0 {
            return Err(OrderingDomainError::ZeroQuantity);
        }

        Ok(Self {
            entry_number: draft.entry_number,
            description,
            class: draft.class,
            item: draft.item,
            cas_number: optional_trimmed(draft.cas_number),
            make: optional_trimmed(draft.make),
            quantity: draft.quantity,
            rate: draft.rate,
            discount_bp: draft.discount_bp,
            gst_bp: draft.gst_bp,
            cost: draft.cost,
        })
    }

    /// Returns the line's position on the printed order.
    #[must_use]
    pub const fn entry_number(&self) -> u32 {
        self.entry_number
    }

    /// Returns the item description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the item class.
    #[must_use]
    pub const fn class(&self) -> ItemClass {
        self.class
    }

    /// Returns the catalogue item reference.
    #[must_use]
    pub const fn item(&self) -> StockItemId {
        self.item
    }

    /// Returns the CAS registry number, if recorded.
    #[must_use]
    pub fn cas_number(&self) -> Option<&str> {
        self.cas_number.as_deref()
    }

    /// Returns the manufacturer or brand, if recorded.
    #[must_use]
    pub fn make(&self) -> Option<&str> {
        self.make.as_deref()
    }

    /// Returns the ordered quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the quoted rate per unit.
    #[must_use]
    pub const fn rate(&self) -> Money {
        self.rate
    }

    /// Returns the discount in basis points.
    #[must_use]
    pub const fn discount_bp(&self) -> u16 {
        self.discount_bp
    }

    /// Returns the GST in basis points.
    #[must_use]
    pub const fn gst_bp(&self) -> u16 {
        self.gst_bp
    }

    /// Returns the line cost after discount, before GST.
    #[must_use]
    pub const fn cost(&self) -> Money {
        self.cost
    }
}
