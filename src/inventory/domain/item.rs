//! Stock item aggregate.

use super::{InventoryDomainError, ItemClass, StockItemId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A catalogued inventory item with its current stock level.
///
/// Quantities are whole units; stock arithmetic is checked so an issue can
/// never drive the level negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    id: StockItemId,
    class: ItemClass,
    code: String,
    name: String,
    unit: String,
    quantity: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted stock item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedStockItemData {
    /// Persisted item identifier.
    pub id: StockItemId,
    /// Persisted item class.
    pub class: ItemClass,
    /// Persisted item code.
    pub code: String,
    /// Persisted item name.
    pub name: String,
    /// Persisted unit of measure.
    pub unit: String,
    /// Persisted stock level.
    pub quantity: u32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl StockItem {
    /// Creates a catalogued item with an initial stock level.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryDomainError::EmptyItemCode`],
    /// [`InventoryDomainError::EmptyItemName`], or
    /// [`InventoryDomainError::EmptyUnit`] when the corresponding field is
    /// blank after trimming.
    pub fn new(
        class: ItemClass,
        raw_code: impl Into<String>,
        raw_name: impl Into<String>,
        raw_unit: impl Into<String>,
        initial_quantity: u32,
        clock: &impl Clock,
    ) -> Result<Self, InventoryDomainError> {
        let code = raw_code.into().trim().to_owned();
        if code.is_empty() {
            return Err(InventoryDomainError::EmptyItemCode);
        }
        let name = raw_name.into().trim().to_owned();
        if name.is_empty() {
            return Err(InventoryDomainError::EmptyItemName);
        }
        let unit = raw_unit.into().trim().to_owned();
        if unit.is_empty() {
            return Err(InventoryDomainError::EmptyUnit);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: StockItemId::new(),
            class,
            code,
            name,
            unit,
            quantity: initial_quantity,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a stock item from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedStockItemData) -> Self {
        Self {
            id: data.id,
            class: data.class,
            code: data.code,
            name: data.name,
            unit: data.unit,
            quantity: data.quantity,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Adds received units to the stock level.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryDomainError::ZeroQuantity`] for a zero amount and
    /// [`InventoryDomainError::QuantityOverflow`] when the addition would
    /// overflow.
    pub fn receive(
        &mut self,
        quantity: u32,
        clock: &impl Clock,
    ) -> Result<(), InventoryDomainError> {
        if quantity == 0 {
            return Err(InventoryDomainError::ZeroQuantity);
        }
        self.quantity = self
            .quantity
            .checked_add(quantity)
            .ok_or(InventoryDomainError::QuantityOverflow)?;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Removes issued units from the stock level.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryDomainError::ZeroQuantity`] for a zero amount and
    /// [`InventoryDomainError::InsufficientStock`] when the level cannot
    /// cover the request.
    pub fn issue(
        &mut self,
        quantity: u32,
        clock: &impl Clock,
    ) -> Result<(), InventoryDomainError> {
        if quantity == 0 {
            return Err(InventoryDomainError::ZeroQuantity);
        }
        self.quantity = self.quantity.checked_sub(quantity).ok_or(
            InventoryDomainError::InsufficientStock {
                available: self.quantity,
                requested: quantity,
            },
        )?;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> StockItemId {
        self.id
    }

    /// Returns the item class.
    #[must_use]
    pub const fn class(&self) -> ItemClass {
        self.class
    }

    /// Returns the item code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit of measure.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the current stock level.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
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
