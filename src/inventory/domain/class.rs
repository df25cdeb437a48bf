//! Inventory item classification.

use super::ParseItemClassError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classifies inventory items for issue and return handling.
///
/// [`ItemClass::Chemicals`] and [`ItemClass::Consumables`] are consumed on
/// issue; nothing is returnable and their issue logs complete immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
    /// Reagents and other chemicals.
    Chemicals,
    /// Reference books and manuals.
    Books,
    /// Laboratory glassware.
    Glasswares,
    /// General consumables.
    Consumables,
    /// Instruments and equipment subject to maintenance.
    Equipments,
    /// Anything not covered by the other classes.
    Others,
}

impl ItemClass {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chemicals => "chemicals",
            Self::Books => "books",
            Self::Glasswares => "glasswares",
            Self::Consumables => "consumables",
            Self::Equipments => "equipments",
            Self::Others => "others",
        }
    }

    /// Returns `true` when issuing items of this class consumes them.
    #[must_use]
    pub const fn is_consumed_on_issue(self) -> bool {
        matches!(self, Self::Chemicals | Self::Consumables)
    }
}

impl TryFrom<&str> for ItemClass {
    type Error = ParseItemClassError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "chemicals" => Ok(Self::Chemicals),
            "books" => Ok(Self::Books),
            "glasswares" => Ok(Self::Glasswares),
            "consumables" => Ok(Self::Consumables),
            "equipments" => Ok(Self::Equipments),
            "others" => Ok(Self::Others),
            _ => Err(ParseItemClassError(value.to_owned())),
        }
    }
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
