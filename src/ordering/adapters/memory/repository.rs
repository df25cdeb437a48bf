//! In-memory order and invoice repositories for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ordering::{
    domain::{Invoice, InvoiceId, PurchaseOrder, PurchaseOrderId},
    ports::{
        InvoiceRepository, InvoiceRepositoryError, InvoiceRepositoryResult, OrderRepository,
        OrderRepositoryError, OrderRepositoryResult,
    },
};

/// Thread-safe in-memory purchase order repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    state: Arc<RwLock<HashMap<PurchaseOrderId, PurchaseOrder>>>,
}

impl InMemoryOrderRepository {
    /// Creates an empty in-memory purchase order repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn store(&self, order: &PurchaseOrder) -> OrderRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            OrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let duplicate = state.contains_key(&order.id())
            || state.values().any(|existing| {
                existing.po_number() == order.po_number()
                    || existing.order_number() == order.order_number()
            });
        if duplicate {
            return Err(OrderRepositoryError::Duplicate(order.id()));
        }
        state.insert(order.id(), order.clone());
        Ok(())
    }

    async fn update(&self, order: &PurchaseOrder) -> OrderRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            OrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&order.id()) {
            return Err(OrderRepositoryError::NotFound(order.id()));
        }
        state.insert(order.id(), order.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: PurchaseOrderId,
    ) -> OrderRepositoryResult<Option<PurchaseOrder>> {
        let state = self.state.read().map_err(|err| {
            OrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }
}

/// Thread-safe in-memory invoice repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInvoiceRepository {
    state: Arc<RwLock<HashMap<InvoiceId, Invoice>>>,
}

impl InMemoryInvoiceRepository {
    /// Creates an empty in-memory invoice repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn store(&self, invoice: &Invoice) -> InvoiceRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            InvoiceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&invoice.id()) {
            return Err(InvoiceRepositoryError::Duplicate(invoice.id()));
        }
        if state
            .values()
            .any(|existing| existing.bill_number() == invoice.bill_number())
        {
            return Err(InvoiceRepositoryError::DuplicateBillNumber(
                invoice.bill_number(),
            ));
        }
        state.insert(invoice.id(), invoice.clone());
        Ok(())
    }

    async fn update(&self, invoice: &Invoice) -> InvoiceRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            InvoiceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&invoice.id()) {
            return Err(InvoiceRepositoryError::NotFound(invoice.id()));
        }
        state.insert(invoice.id(), invoice.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: InvoiceId) -> InvoiceRepositoryResult<Option<Invoice>> {
        let state = self.state.read().map_err(|err| {
            InvoiceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn find_by_order(
        &self,
        order: PurchaseOrderId,
    ) -> InvoiceRepositoryResult<Vec<Invoice>> {
        let state = self.state.read().map_err(|err| {
            InvoiceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut invoices: Vec<Invoice> = state
            .values()
            .filter(|invoice| invoice.order() == order)
            .cloned()
            .collect();
        invoices.sort_by_key(Invoice::created_at);
        Ok(invoices)
    }
}
