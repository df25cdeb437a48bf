//! Inward stock entry aggregate and the maintenance scan window.

use super::{InventoryDomainError, RestockId, StockItemId};
use crate::directory::domain::UserId;
use crate::sequence::domain::DocumentCode;
use chrono::{DateTime, Days, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Days before today still considered due for maintenance.
const WINDOW_DAYS_BEHIND: u64 = 4;

/// Days after today considered due for maintenance, exclusive.
const WINDOW_DAYS_AHEAD: u64 = 5;

/// Half-open day range used by the maintenance scan.
///
/// A maintenance date is due when `start <= date < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl MaintenanceWindow {
    /// Builds the scan window around a reference day: four days behind
    /// through four days ahead.
    #[must_use]
    pub fn around(today: NaiveDate) -> Self {
        Self {
            start: today - Days::new(WINDOW_DAYS_BEHIND),
            end: today + Days::new(WINDOW_DAYS_AHEAD),
        }
    }

    /// Returns the inclusive start day.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the exclusive end day.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` when the given day falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Inward stock entry replenishing a catalogued item.
///
/// Carries the procurement paperwork references and, for equipment, the
/// maintenance date the hourly scan watches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restock {
    id: RestockId,
    code: DocumentCode,
    item: StockItemId,
    description: Option<String>,
    quantity: u32,
    unit: String,
    grade: Option<String>,
    cas_number: Option<String>,
    hazard_class: Option<String>,
    vendor: Option<Uuid>,
    invoice_reference: Option<String>,
    expiry_date: Option<NaiveDate>,
    maintenance_date: Option<NaiveDate>,
    recorded_by: UserId,
    created_at: DateTime<Utc>,
}

/// Parameter object for recording an inward stock entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestockParams {
    /// Item the stock replenishes.
    pub item: StockItemId,
    /// Units received.
    pub quantity: u32,
    /// Unit of measure for the received stock.
    pub unit: String,
    /// Free-form description of the consignment.
    pub description: Option<String>,
    /// Chemical grade, where applicable.
    pub grade: Option<String>,
    /// CAS registry number, where applicable.
    pub cas_number: Option<String>,
    /// Hazard classification, where applicable.
    pub hazard_class: Option<String>,
    /// Vendor the stock came from.
    pub vendor: Option<Uuid>,
    /// Vendor invoice or bill reference.
    pub invoice_reference: Option<String>,
    /// Expiry date for perishable stock.
    pub expiry_date: Option<NaiveDate>,
    /// Next maintenance date for equipment.
    pub maintenance_date: Option<NaiveDate>,
    /// Account that recorded the entry.
    pub recorded_by: UserId,
}

/// Parameter object for reconstructing a persisted restock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRestockData {
    /// Persisted restock identifier.
    pub id: RestockId,
    /// Persisted inward code.
    pub code: DocumentCode,
    /// Persisted item reference.
    pub item: StockItemId,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted quantity.
    pub quantity: u32,
    /// Persisted unit of measure.
    pub unit: String,
    /// Persisted grade.
    pub grade: Option<String>,
    /// Persisted CAS registry number.
    pub cas_number: Option<String>,
    /// Persisted hazard classification.
    pub hazard_class: Option<String>,
    /// Persisted vendor reference.
    pub vendor: Option<Uuid>,
    /// Persisted invoice reference.
    pub invoice_reference: Option<String>,
    /// Persisted expiry date.
    pub expiry_date: Option<NaiveDate>,
    /// Persisted maintenance date.
    pub maintenance_date: Option<NaiveDate>,
    /// Persisted recording account.
    pub recorded_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Restock {
    /// Creates a validated inward stock entry under the given inward code.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryDomainError::ZeroQuantity`] for a zero quantity
    /// and [`InventoryDomainError::EmptyUnit`] for a blank unit.
    pub fn new(
        code: DocumentCode,
        params: RestockParams,
        clock: &impl Clock,
    ) -> Result<Self, InventoryDomainError> {
        if params.quantity == 0 {
            return Err(InventoryDomainError::ZeroQuantity);
        }
        let unit = params.unit.trim().to_owned();
        if unit.is_empty() {
            return Err(InventoryDomainError::EmptyUnit);
        }

        Ok(Self {
            id: RestockId::new(),
            code,
            item: params.item,
            description: params.description,
            quantity: params.quantity,
            unit,
            grade: params.grade,
            cas_number: params.cas_number,
            hazard_class: params.hazard_class,
            vendor: params.vendor,
            invoice_reference: params.invoice_reference,
            expiry_date: params.expiry_date,
            maintenance_date: params.maintenance_date,
            recorded_by: params.recorded_by,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a restock from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRestockData) -> Self {
        Self {
            id: data.id,
            code: data.code,
            item: data.item,
            description: data.description,
            quantity: data.quantity,
            unit: data.unit,
            grade: data.grade,
            cas_number: data.cas_number,
            hazard_class: data.hazard_class,
            vendor: data.vendor,
            invoice_reference: data.invoice_reference,
            expiry_date: data.expiry_date,
            maintenance_date: data.maintenance_date,
            recorded_by: data.recorded_by,
            created_at: data.created_at,
        }
    }

    /// Returns `true` when the maintenance date falls inside the window.
    #[must_use]
    pub fn maintenance_due_within(&self, window: &MaintenanceWindow) -> bool {
        self.maintenance_date
            .is_some_and(|date| window.contains(date))
    }

    /// Returns the restock identifier.
    #[must_use]
    pub const fn id(&self) -> RestockId {
        self.id
    }

    /// Returns the inward code.
    #[must_use]
    pub const fn code(&self) -> &DocumentCode {
        &self.code
    }

    /// Returns the replenished item reference.
    #[must_use]
    pub const fn item(&self) -> StockItemId {
        self.item
    }

    /// Returns the consignment description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the received quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the unit of measure.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the chemical grade.
    #[must_use]
    pub fn grade(&self) -> Option<&str> {
        self.grade.as_deref()
    }

    /// Returns the CAS registry number.
    #[must_use]
    pub fn cas_number(&self) -> Option<&str> {
        self.cas_number.as_deref()
    }

    /// Returns the hazard classification.
    #[must_use]
    pub fn hazard_class(&self) -> Option<&str> {
        self.hazard_class.as_deref()
    }

    /// Returns the vendor reference.
    #[must_use]
    pub const fn vendor(&self) -> Option<Uuid> {
        self.vendor
    }

    /// Returns the vendor invoice reference.
    #[must_use]
    pub fn invoice_reference(&self) -> Option<&str> {
        self.invoice_reference.as_deref()
    }

    /// Returns the expiry date.
    #[must_use]
    pub const fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }

    /// Returns the maintenance date.
    #[must_use]
    pub const fn maintenance_date(&self) -> Option<NaiveDate> {
        self.maintenance_date
    }

    /// Returns the recording account.
    #[must_use]
    pub const fn recorded_by(&self) -> UserId {
        self.recorded_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
