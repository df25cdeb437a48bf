//! Purchase order and invoice lifecycle orchestration.
//!
//! Raises purchase orders under their two generated numbers, drives them
//! through approval, placement, and receipt, and records vendor invoices
//! against them. Creation and invoice decisions fan out notifications to
//! the administrative roles; the later order transitions only persist.

use crate::directory::{
    domain::{Role, UserAccount, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::notification::{
    domain::NotificationKind,
    services::{NotificationFanoutError, NotificationPublisher, PublishNotificationRequest},
};
use crate::ordering::{
    domain::{
        Invoice, InvoiceDecision, InvoiceId, InvoiceParams, OrderDecision, OrderingDomainError,
        PurchaseOrder, PurchaseOrderId, PurchaseOrderParams,
    },
    ports::{
        InvoiceRepository, InvoiceRepositoryError, OrderRepository, OrderRepositoryError,
    },
};
use crate::sequence::{
    domain::{DocumentKind, DocumentRef, GroupKey},
    ports::{DocumentNumbering, SequenceStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for the procurement workflow.
#[derive(Debug, Error)]
pub enum ProcurementWorkflowError {
    /// Domain validation or a status transition failed.
    #[error(transparent)]
    Domain(#[from] OrderingDomainError),
    /// Purchase order persistence failed.
    #[error(transparent)]
    OrderRepository(#[from] OrderRepositoryError),
    /// Invoice persistence failed.
    #[error(transparent)]
    InvoiceRepository(#[from] InvoiceRepositoryError),
    /// The user directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// Number generation failed.
    #[error(transparent)]
    Numbering(#[from] SequenceStoreError),
    /// The notification fan-out failed.
    #[error(transparent)]
    Notification(#[from] NotificationFanoutError),
    /// The purchase order does not exist.
    #[error("purchase order not found: {0}")]
    OrderNotFound(PurchaseOrderId),
    /// The invoice does not exist.
    #[error("invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),
    /// A referenced account is not in the directory.
    #[error("user account not found: {0}")]
    UnknownAccount(UserId),
}

/// Result type for procurement workflow operations.
pub type ProcurementWorkflowResult<T> = Result<T, ProcurementWorkflowError>;

/// Orchestrates purchase orders and invoices across persistence, the user
/// directory, document numbering, and notification fan-out.
#[derive(Clone)]
pub struct ProcurementWorkflow<O, I, D, G, P, C>
where
    O: OrderRepository,
    I: InvoiceRepository,
    D: UserDirectory,
    G: DocumentNumbering,
    P: NotificationPublisher,
    C: Clock + Send + Sync,
{
    orders: Arc<O>,
    invoices: Arc<I>,
    directory: Arc<D>,
    numbering: Arc<G>,
    publisher: Arc<P>,
    clock: Arc<C>,
}

impl<O, I, D, G, P, C> ProcurementWorkflow<O, I, D, G, P, C>
where
    O: OrderRepository,
    I: InvoiceRepository,
    D: UserDirectory,
    G: DocumentNumbering,
    P: NotificationPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a procurement workflow service.
    #[must_use]
    pub const fn new(
        orders: Arc<O>,
        invoices: Arc<I>,
        directory: Arc<D>,
        numbering: Arc<G>,
        publisher: Arc<P>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            orders,
            invoices,
            directory,
            numbering,
            publisher,
            clock,
        }
    }

    /// Raises a purchase order: issues the monthly `PO-` code and the
    /// category order number, persists, and notifies administrators and
    /// managers.
    ///
    /// # Errors
    ///
    /// Returns [`ProcurementWorkflowError::UnknownAccount`] for an
    /// unregistered creator and [`ProcurementWorkflowError::Domain`] for
    /// invalid lines, notes, or totals.
    pub async fn create_order(
        &self,
        params: PurchaseOrderParams,
        group_key: Option<&GroupKey>,
    ) -> ProcurementWorkflowResult<PurchaseOrder> {
        let creator = self.account(params.created_by).await?;
        let po_number = self
            .numbering
            .monthly_code(DocumentKind::PurchaseOrder)
            .await?;
        let order_number = self
            .numbering
            .order_number(params.category.kind(), group_key)
            .await?;
        let order = PurchaseOrder::new(po_number, order_number, params, &*self.clock)?;
        self.orders.store(&order).await?;

        let message = format!(
            "Order {} has been created by {}.",
            order.order_number(),
            creator.display_name()
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(
                    "Order Created",
                    message,
                    NotificationKind::OrderCreated,
                    creator.id(),
                )
                .with_subject(order_subject(order.id()))
                .with_recipients([Role::Admin, Role::Manager]),
            )
            .await?;
        debug!(
            po_number = %order.po_number(),
            order_number = %order.order_number(),
            "purchase order created"
        );
        Ok(order)
    }

    /// Approves or rejects a pending purchase order, recording the
    /// approver and decision timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ProcurementWorkflowError::Domain`] with the from/to
    /// states when the order has already been decided.
    pub async fn decide_order(
        &self,
        id: PurchaseOrderId,
        decision: OrderDecision,
        approver: UserId,
        remark: Option<String>,
    ) -> ProcurementWorkflowResult<PurchaseOrder> {
        self.account(approver).await?;
        let mut order = self.load_order(id).await?;
        order.decide(decision, approver, remark, &*self.clock)?;
        self.orders.update(&order).await?;
        debug!(
            po_number = %order.po_number(),
            status = order.status().as_str(),
            "purchase order decided"
        );
        Ok(order)
    }

    /// Records that an approved order was sent to the vendor.
    ///
    /// # Errors
    ///
    /// Returns [`ProcurementWorkflowError::Domain`] unless the order is
    /// `Approved`.
    pub async fn place_order(
        &self,
        id: PurchaseOrderId,
        remark: Option<String>,
    ) -> ProcurementWorkflowResult<PurchaseOrder> {
        let mut order = self.load_order(id).await?;
        order.mark_placed(remark, &*self.clock)?;
        self.orders.update(&order).await?;
        debug!(po_number = %order.po_number(), "purchase order placed");
        Ok(order)
    }

    /// Records that the goods arrived, closing the order.
    ///
    /// # Errors
    ///
    /// Returns [`ProcurementWorkflowError::Domain`] unless the order is
    /// `Placed`.
    pub async fn receive_order(
        &self,
        id: PurchaseOrderId,
        remark: Option<String>,
    ) -> ProcurementWorkflowResult<PurchaseOrder> {
        let mut order = self.load_order(id).await?;
        order.mark_received(remark, &*self.clock)?;
        self.orders.update(&order).await?;
        debug!(po_number = %order.po_number(), "purchase order received");
        Ok(order)
    }

    /// Records a vendor invoice against a purchase order and notifies
    /// administrators and managers.
    ///
    /// # Errors
    ///
    /// Returns [`ProcurementWorkflowError::OrderNotFound`] for an unknown
    /// order and [`ProcurementWorkflowError::InvoiceRepository`] with
    /// [`InvoiceRepositoryError::DuplicateBillNumber`] when the bill
    /// number is already recorded.
    pub async fn create_invoice(
        &self,
        params: InvoiceParams,
    ) -> ProcurementWorkflowResult<Invoice> {
        let creator = self.account(params.created_by).await?;
        let order = self.load_order(params.order).await?;
        let invoice = Invoice::new(params, &*self.clock)?;
        self.invoices.store(&invoice).await?;

        let message = format!(
            "Invoice {} against order {} has been recorded by {}.",
            invoice.bill_number(),
            order.order_number(),
            creator.display_name()
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(
                    "Invoice Created",
                    message,
                    NotificationKind::InvoiceCreated,
                    creator.id(),
                )
                .with_subject(order_subject(order.id()))
                .with_recipients([Role::Admin, Role::Manager]),
            )
            .await?;
        debug!(
            bill_number = invoice.bill_number(),
            po_number = %order.po_number(),
            "invoice recorded"
        );
        Ok(invoice)
    }

    /// Approves, rejects, or holds an invoice and notifies administrators
    /// and managers of the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ProcurementWorkflowError::Domain`] with the from/to
    /// states when the invoice has already been finally decided.
    pub async fn decide_invoice(
        &self,
        id: InvoiceId,
        decision: InvoiceDecision,
        approver: UserId,
        remark: Option<String>,
    ) -> ProcurementWorkflowResult<Invoice> {
        let deciding = self.account(approver).await?;
        let mut invoice = self.load_invoice(id).await?;
        invoice.decide(decision, approver, remark, &*self.clock)?;
        self.invoices.update(&invoice).await?;

        let verb = match decision {
            InvoiceDecision::Approve => "approved",
            InvoiceDecision::Reject => "rejected",
            InvoiceDecision::Hold => "put on hold",
        };
        let message = format!(
            "Invoice {} has been {verb} by {}.",
            invoice.bill_number(),
            deciding.display_name()
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(
                    format!("Invoice {}", invoice.status().display_name()),
                    message,
                    NotificationKind::InvoiceDecided,
                    deciding.id(),
                )
                .with_subject(order_subject(invoice.order()))
                .with_recipients([Role::Admin, Role::Manager]),
            )
            .await?;
        debug!(
            bill_number = invoice.bill_number(),
            status = invoice.status().as_str(),
            "invoice decided"
        );
        Ok(invoice)
    }

    /// Lists the invoices recorded against a purchase order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProcurementWorkflowError::OrderNotFound`] for an unknown
    /// order.
    pub async fn invoices_for_order(
        &self,
        id: PurchaseOrderId,
    ) -> ProcurementWorkflowResult<Vec<Invoice>> {
        self.load_order(id).await?;
        Ok(self.invoices.find_by_order(id).await?)
    }

    async fn load_order(&self, id: PurchaseOrderId) -> ProcurementWorkflowResult<PurchaseOrder> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or(ProcurementWorkflowError::OrderNotFound(id))
    }

    async fn load_invoice(&self, id: InvoiceId) -> ProcurementWorkflowResult<Invoice> {
        self.invoices
            .find_by_id(id)
            .await?
            .ok_or(ProcurementWorkflowError::InvoiceNotFound(id))
    }

    async fn account(&self, id: UserId) -> ProcurementWorkflowResult<UserAccount> {
        self.directory
            .find_by_id(id)
            .await?
            .ok_or(ProcurementWorkflowError::UnknownAccount(id))
    }
}

fn order_subject(id: PurchaseOrderId) -> DocumentRef {
    DocumentRef::new(DocumentKind::PurchaseOrder, id.into_inner())
}
