//! Document code and order number value types.
//!
//! Every workflow document carries a human-readable code generated from an
//! atomic counter: monthly codes such as `R-202508-007` for requisitions,
//! indents, order requests, purchase orders, and inward entries, and
//! financial-year order numbers such as `JAI-PROJ/042/2025-26` for orders
//! placed with vendors.

use super::error::{ParseCategoryKindError, ParseDocumentKindError, SequenceDomainError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow document families that draw monthly codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Stock requisition drawing from existing inventory.
    Requisition,
    /// New indent requesting items not yet stocked.
    Indent,
    /// Order request for replenishing known items.
    OrderRequest,
    /// Purchase order placed with a vendor.
    PurchaseOrder,
    /// Inward entry recording received stock.
    Inward,
}

impl DocumentKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requisition => "requisition",
            Self::Indent => "indent",
            Self::OrderRequest => "order_request",
            Self::PurchaseOrder => "purchase_order",
            Self::Inward => "inward",
        }
    }

    /// Returns the short tag used in generated document codes.
    #[must_use]
    pub const fn code_tag(self) -> &'static str {
        match self {
            Self::Requisition => "R",
            Self::Indent => "NI",
            Self::OrderRequest => "O",
            Self::PurchaseOrder => "PO",
            Self::Inward => "INW",
        }
    }
}

impl TryFrom<&str> for DocumentKind {
    type Error = ParseDocumentKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "requisition" => Ok(Self::Requisition),
            "indent" => Ok(Self::Indent),
            "order_request" => Ok(Self::OrderRequest),
            "purchase_order" => Ok(Self::PurchaseOrder),
            "inward" => Ok(Self::Inward),
            _ => Err(ParseDocumentKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Budget category a workflow document is raised against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// General departmental budget.
    General,
    /// Funded project budget.
    Project,
    /// Practical (teaching laboratory) budget.
    Practical,
    /// Any other budget head.
    Other,
}

impl CategoryKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Project => "project",
            Self::Practical => "practical",
            Self::Other => "other",
        }
    }

    /// Returns the four-letter tag used in order numbers.
    #[must_use]
    pub const fn order_tag(self) -> &'static str {
        match self {
            Self::General => "GENE",
            Self::Project => "PROJ",
            Self::Practical => "PRAC",
            Self::Other => "OTHE",
        }
    }
}

impl TryFrom<&str> for CategoryKind {
    type Error = ParseCategoryKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "general" => Ok(Self::General),
            "project" => Ok(Self::Project),
            "practical" => Ok(Self::Practical),
            "other" => Ok(Self::Other),
            _ => Err(ParseCategoryKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counter key identifying one independent sequence.
///
/// Monthly document codes use one prefix per document kind and month
/// (`R-202508`); order numbers use one prefix per institution, category,
/// optional grouping key, and financial year (`JAI-PROJ/2025-26`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequencePrefix(String);

impl SequencePrefix {
    /// Creates a validated counter prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceDomainError::InvalidPrefix`] when the value is empty
    /// after trimming or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, SequenceDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(SequenceDomainError::InvalidPrefix(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Builds the monthly counter prefix for a document kind and date.
    #[must_use]
    pub fn monthly(kind: DocumentKind, date: NaiveDate) -> Self {
        Self(format!(
            "{}-{:04}{:02}",
            kind.code_tag(),
            date.year(),
            date.month()
        ))
    }

    /// Builds the order-number counter prefix.
    ///
    /// The financial year is part of the key, so order counters restart each
    /// financial year.
    #[must_use]
    pub fn order(
        institution: &InstitutionTag,
        category: CategoryKind,
        group_key: Option<&GroupKey>,
        financial_year: FinancialYear,
    ) -> Self {
        let key = group_key.map_or_else(String::new, |key| format!("/{key}"));
        Self(format!(
            "{}-{}{}/{}",
            institution.as_str(),
            category.order_tag(),
            key,
            financial_year
        ))
    }

    /// Returns the prefix as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SequencePrefix {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SequencePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Institution tag prefixed to every order number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstitutionTag(String);

impl InstitutionTag {
    /// Creates a validated institution tag.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceDomainError::InvalidInstitutionTag`] when the value
    /// is empty after trimming, contains whitespace, or contains `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, SequenceDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty()
            || normalized.chars().any(char::is_whitespace)
            || normalized.contains('/')
        {
            return Err(SequenceDomainError::InvalidInstitutionTag(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the tag as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for InstitutionTag {
    fn default() -> Self {
        Self("JAI".to_owned())
    }
}

impl fmt::Display for InstitutionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional grouping key inserted between category tag and counter in order
/// numbers, used to keep per-project order sequences apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    /// Creates a validated grouping key.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceDomainError::InvalidGroupKey`] when the value is
    /// empty after trimming, contains whitespace, or contains `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, SequenceDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty()
            || normalized.chars().any(char::is_whitespace)
            || normalized.contains('/')
        {
            return Err(SequenceDomainError::InvalidGroupKey(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Financial-year label attached to order numbers.
///
/// The label is anchored to the calendar year of the generation date:
/// any date in 2025 renders `2025-26`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinancialYear(i32);

impl FinancialYear {
    /// Derives the financial year from a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.year())
    }

    /// Returns the starting calendar year.
    #[must_use]
    pub const fn start_year(self) -> i32 {
        self.0
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let next = (self.0 + 1).to_string();
        let tail = next.get(next.len().saturating_sub(2)..).unwrap_or(&next);
        write!(f, "{}-{}", self.0, tail)
    }
}

/// Generated monthly document code, e.g. `R-202508-007`.
///
/// The counter segment is zero-padded to three digits and grows naturally
/// beyond `999`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentCode(String);

impl DocumentCode {
    /// Composes a document code from its parts.
    #[must_use]
    pub fn compose(kind: DocumentKind, date: NaiveDate, counter: u64) -> Self {
        Self(format!(
            "{}-{:04}{:02}-{:03}",
            kind.code_tag(),
            date.year(),
            date.month(),
            counter
        ))
    }

    /// Reconstructs a document code from persistence.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceDomainError::EmptyDocumentCode`] when the stored
    /// value is empty after trimming.
    pub fn from_stored(value: impl Into<String>) -> Result<Self, SequenceDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(SequenceDomainError::EmptyDocumentCode);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DocumentCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DocumentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generated order number, e.g. `JAI-PROJ/DST22/042/2025-26`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Composes an order number from its parts.
    #[must_use]
    pub fn compose(
        institution: &InstitutionTag,
        category: CategoryKind,
        group_key: Option<&GroupKey>,
        counter: u64,
        financial_year: FinancialYear,
    ) -> Self {
        let key = group_key.map_or_else(String::new, |key| format!("/{key}"));
        Self(format!(
            "{}-{}{}/{:03}/{}",
            institution.as_str(),
            category.order_tag(),
            key,
            counter,
            financial_year
        ))
    }

    /// Reconstructs an order number from persistence.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceDomainError::EmptyOrderNumber`] when the stored
    /// value is empty after trimming.
    pub fn from_stored(value: impl Into<String>) -> Result<Self, SequenceDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(SequenceDomainError::EmptyOrderNumber);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the order number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
