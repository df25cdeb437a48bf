//! Repository ports for purchase orders and invoices.

use crate::ordering::domain::{Invoice, InvoiceId, PurchaseOrder, PurchaseOrderId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for order repository operations.
pub type OrderRepositoryResult<T> = Result<T, OrderRepositoryError>;

/// Result type for invoice repository operations.
pub type InvoiceRepositoryResult<T> = Result<T, InvoiceRepositoryError>;

/// Purchase order persistence contract.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores a new purchase order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderRepositoryError::Duplicate`] when the identifier,
    /// the document code, or the order number already exists.
    async fn store(&self, order: &PurchaseOrder) -> OrderRepositoryResult<()>;

    /// Updates an existing purchase order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderRepositoryError::NotFound`] when the order does
    /// not exist.
    async fn update(&self, order: &PurchaseOrder) -> OrderRepositoryResult<()>;

    /// Finds a purchase order by identifier.
    ///
    /// Returns `None` when the order does not exist.
    async fn find_by_id(&self, id: PurchaseOrderId)
    -> OrderRepositoryResult<Option<PurchaseOrder>>;
}

/// Invoice persistence contract.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Stores a new invoice.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceRepositoryError::Duplicate`] when the identifier
    /// already exists and [`InvoiceRepositoryError::DuplicateBillNumber`]
    /// when another invoice already carries the bill number.
    async fn store(&self, invoice: &Invoice) -> InvoiceRepositoryResult<()>;

    /// Updates an existing invoice.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceRepositoryError::NotFound`] when the invoice does
    /// not exist.
    async fn update(&self, invoice: &Invoice) -> InvoiceRepositoryResult<()>;

    /// Finds an invoice by identifier.
    ///
    /// Returns `None` when the invoice does not exist.
    async fn find_by_id(&self, id: InvoiceId) -> InvoiceRepositoryResult<Option<Invoice>>;

    /// Lists the invoices recorded against a purchase order, oldest first.
    async fn find_by_order(&self, order: PurchaseOrderId)
    -> InvoiceRepositoryResult<Vec<Invoice>>;
}

/// Errors returned by purchase order repository implementations.
#[derive(Debug, Clone, Error)]
pub enum OrderRepositoryError {
    /// An order with the same identifier or generated number already exists.
    #[error("duplicate purchase order: {0}")]
    Duplicate(PurchaseOrderId),

    /// The purchase order was not found.
    #[error("purchase order not found: {0}")]
    NotFound(PurchaseOrderId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl OrderRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by invoice repository implementations.
#[derive(Debug, Clone, Error)]
pub enum InvoiceRepositoryError {
    /// An invoice with the same identifier already exists.
    #[error("duplicate invoice: {0}")]
    Duplicate(InvoiceId),

    /// Another invoice already carries the bill number.
    #[error("duplicate bill number: {0}")]
    DuplicateBillNumber(u64),

    /// The invoice was not found.
    #[error("invoice not found: {0}")]
    NotFound(InvoiceId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl InvoiceRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
