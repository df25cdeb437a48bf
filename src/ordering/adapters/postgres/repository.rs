//! `PostgreSQL` order and invoice repository implementations.

use super::{
    models::{InvoiceRow, NewInvoiceRow, NewPurchaseOrderRow, PurchaseOrderRow},
    schema::{invoices, purchase_orders},
};
use crate::directory::domain::UserId;
use crate::ordering::{
    domain::{
        Invoice, InvoiceId, InvoiceStatus, Money, OrderLine, OrderStatus, PersistedInvoiceData,
        PersistedPurchaseOrderData, PurchaseOrder, PurchaseOrderId, VendorId,
    },
    ports::{
        InvoiceRepository, InvoiceRepositoryError, InvoiceRepositoryResult, OrderRepository,
        OrderRepositoryError, OrderRepositoryResult,
    },
};
use crate::sequence::domain::{CategoryKind, CategoryRef, DocumentCode, OrderNumber};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// Connection pool alias for the ordering context.
pub type OrderingPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed purchase order repository.
#[derive(Debug, Clone)]
pub struct PostgresOrderRepository {
    pool: OrderingPgPool,
}

impl PostgresOrderRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: OrderingPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> OrderRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> OrderRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(OrderRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(OrderRepositoryError::persistence)?
    }
}

/// Changeset covering the mutable purchase order columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = purchase_orders)]
struct PurchaseOrderChangeset {
    pub notes: Option<String>,
    pub approved_by: Option<uuid::Uuid>,
    pub decided_at: Option<chrono::DateTime<chrono::Utc>>,
    pub status: String,
    pub remark: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn store(&self, order: &PurchaseOrder) -> OrderRepositoryResult<()> {
        let order_id = order.id();
        let new_row = to_new_order_row(order)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(purchase_orders::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        OrderRepositoryError::Duplicate(order_id)
                    }
                    _ => OrderRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, order: &PurchaseOrder) -> OrderRepositoryResult<()> {
        let order_id = order.id();
        let changeset = to_order_changeset(order);

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                purchase_orders::table.filter(purchase_orders::id.eq(order_id.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(OrderRepositoryError::persistence)?;
            if updated == 0 {
                return Err(OrderRepositoryError::NotFound(order_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: PurchaseOrderId,
    ) -> OrderRepositoryResult<Option<PurchaseOrder>> {
        self.run_blocking(move |connection| {
            let row = purchase_orders::table
                .filter(purchase_orders::id.eq(id.into_inner()))
                .select(PurchaseOrderRow::as_select())
                .first::<PurchaseOrderRow>(connection)
                .optional()
                .map_err(OrderRepositoryError::persistence)?;
            row.map(row_to_order).transpose()
        })
        .await
    }
}

/// `PostgreSQL`-backed invoice repository.
#[derive(Debug, Clone)]
pub struct PostgresInvoiceRepository {
    pool: OrderingPgPool,
}

impl PostgresInvoiceRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: OrderingPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> InvoiceRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> InvoiceRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(InvoiceRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(InvoiceRepositoryError::persistence)?
    }
}

/// Changeset covering the mutable invoice columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = invoices)]
struct InvoiceChangeset {
    pub status: String,
    pub approved_by: Option<uuid::Uuid>,
    pub decided_at: Option<chrono::DateTime<chrono::Utc>>,
    pub remark: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    async fn store(&self, invoice: &Invoice) -> InvoiceRepositoryResult<()> {
        let invoice_id = invoice.id();
        let bill_number = invoice.bill_number();
        let new_row = to_new_invoice_row(invoice)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(invoices::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match &err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                        if info
                            .constraint_name()
                            .is_some_and(|name| name.contains("bill_number"))
                        {
                            InvoiceRepositoryError::DuplicateBillNumber(bill_number)
                        } else {
                            InvoiceRepositoryError::Duplicate(invoice_id)
                        }
                    }
                    _ => InvoiceRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, invoice: &Invoice) -> InvoiceRepositoryResult<()> {
        let invoice_id = invoice.id();
        let changeset = to_invoice_changeset(invoice);

        self.run_blocking(move |connection| {
            let updated =
                diesel::update(invoices::table.filter(invoices::id.eq(invoice_id.into_inner())))
                    .set(&changeset)
                    .execute(connection)
                    .map_err(InvoiceRepositoryError::persistence)?;
            if updated == 0 {
                return Err(InvoiceRepositoryError::NotFound(invoice_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: InvoiceId) -> InvoiceRepositoryResult<Option<Invoice>> {
        self.run_blocking(move |connection| {
            let row = invoices::table
                .filter(invoices::id.eq(id.into_inner()))
                .select(InvoiceRow::as_select())
                .first::<InvoiceRow>(connection)
                .optional()
                .map_err(InvoiceRepositoryError::persistence)?;
            row.map(row_to_invoice).transpose()
        })
        .await
    }

    async fn find_by_order(
        &self,
        order: PurchaseOrderId,
    ) -> InvoiceRepositoryResult<Vec<Invoice>> {
        self.run_blocking(move |connection| {
            let rows = invoices::table
                .filter(invoices::order_id.eq(order.into_inner()))
                .order(invoices::created_at.asc())
                .select(InvoiceRow::as_select())
                .load::<InvoiceRow>(connection)
                .map_err(InvoiceRepositoryError::persistence)?;
            rows.into_iter().map(row_to_invoice).collect()
        })
        .await
    }
}

fn paise_to_column(amount: Money) -> OrderRepositoryResult<i64> {
    i64::try_from(amount.paise()).map_err(OrderRepositoryError::persistence)
}

fn column_to_paise(column: i64) -> OrderRepositoryResult<Money> {
    u64::try_from(column)
        .map(Money::from_paise)
        .map_err(OrderRepositoryError::invalid_persisted_data)
}

fn lines_to_value(lines: &[OrderLine]) -> OrderRepositoryResult<Value> {
    serde_json::to_value(lines).map_err(OrderRepositoryError::persistence)
}

fn to_new_order_row(order: &PurchaseOrder) -> OrderRepositoryResult<NewPurchaseOrderRow> {
    Ok(NewPurchaseOrderRow {
        id: order.id().into_inner(),
        po_number: order.po_number().as_str().to_owned(),
        order_number: order.order_number().as_str().to_owned(),
        category_kind: order.category().kind().as_str().to_owned(),
        category_ref: order.category().id(),
        vendor: order.vendor().into_inner(),
        quotation_ref: order.quotation_ref().to_owned(),
        quotation_date: order.quotation_date(),
        lines: lines_to_value(order.lines())?,
        total_cost: paise_to_column(order.total_cost())?,
        total_gst: paise_to_column(order.total_gst())?,
        grand_total: paise_to_column(order.grand_total())?,
        notes: order.notes().map(str::to_owned),
        created_by: order.created_by().into_inner(),
        status: order.status().as_str().to_owned(),
        created_at: order.created_at(),
        updated_at: order.updated_at(),
    })
}

fn to_order_changeset(order: &PurchaseOrder) -> PurchaseOrderChangeset {
    PurchaseOrderChangeset {
        notes: order.notes().map(str::to_owned),
        approved_by: order.approved_by().map(UserId::into_inner),
        decided_at: order.decided_at(),
        status: order.status().as_str().to_owned(),
        remark: order.remark().map(str::to_owned),
        updated_at: order.updated_at(),
    }
}

fn row_to_order(row: PurchaseOrderRow) -> OrderRepositoryResult<PurchaseOrder> {
    let po_number = DocumentCode::from_stored(row.po_number)
        .map_err(OrderRepositoryError::invalid_persisted_data)?;
    let order_number = OrderNumber::from_stored(row.order_number)
        .map_err(OrderRepositoryError::invalid_persisted_data)?;
    let category_kind = CategoryKind::try_from(row.category_kind.as_str())
        .map_err(OrderRepositoryError::invalid_persisted_data)?;
    let status = OrderStatus::try_from(row.status.as_str())
        .map_err(OrderRepositoryError::invalid_persisted_data)?;
    let lines: Vec<OrderLine> = serde_json::from_value(row.lines)
        .map_err(OrderRepositoryError::invalid_persisted_data)?;

    let data = PersistedPurchaseOrderData {
        id: PurchaseOrderId::from_uuid(row.id),
        po_number,
        order_number,
        category: CategoryRef::new(category_kind, row.category_ref),
        vendor: VendorId::from_uuid(row.vendor),
        quotation_ref: row.quotation_ref,
        quotation_date: row.quotation_date,
        lines,
        total_cost: column_to_paise(row.total_cost)?,
        total_gst: column_to_paise(row.total_gst)?,
        grand_total: column_to_paise(row.grand_total)?,
        notes: row.notes,
        created_by: UserId::from_uuid(row.created_by),
        approved_by: row.approved_by.map(UserId::from_uuid),
        decided_at: row.decided_at,
        status,
        remark: row.remark,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(PurchaseOrder::from_persisted(data))
}

fn to_new_invoice_row(invoice: &Invoice) -> InvoiceRepositoryResult<NewInvoiceRow> {
    Ok(NewInvoiceRow {
        id: invoice.id().into_inner(),
        order_id: invoice.order().into_inner(),
        bill_number: i64::try_from(invoice.bill_number())
            .map_err(InvoiceRepositoryError::persistence)?,
        bill_date: invoice.bill_date(),
        amount: i64::try_from(invoice.amount().paise())
            .map_err(InvoiceRepositoryError::persistence)?,
        status: invoice.status().as_str().to_owned(),
        created_by: invoice.created_by().into_inner(),
        comment: invoice.comment().map(str::to_owned),
        created_at: invoice.created_at(),
        updated_at: invoice.updated_at(),
    })
}

fn to_invoice_changeset(invoice: &Invoice) -> InvoiceChangeset {
    InvoiceChangeset {
        status: invoice.status().as_str().to_owned(),
        approved_by: invoice.approved_by().map(UserId::into_inner),
        decided_at: invoice.decided_at(),
        remark: invoice.remark().map(str::to_owned),
        updated_at: invoice.updated_at(),
    }
}

fn row_to_invoice(row: InvoiceRow) -> InvoiceRepositoryResult<Invoice> {
    let status = InvoiceStatus::try_from(row.status.as_str())
        .map_err(InvoiceRepositoryError::invalid_persisted_data)?;
    let bill_number =
        u64::try_from(row.bill_number).map_err(InvoiceRepositoryError::invalid_persisted_data)?;
    let amount = u64::try_from(row.amount)
        .map(Money::from_paise)
        .map_err(InvoiceRepositoryError::invalid_persisted_data)?;

    let data = PersistedInvoiceData {
        id: InvoiceId::from_uuid(row.id),
        order: PurchaseOrderId::from_uuid(row.order_id),
        bill_number,
        bill_date: row.bill_date,
        amount,
        status,
        created_by: UserId::from_uuid(row.created_by),
        approved_by: row.approved_by.map(UserId::from_uuid),
        decided_at: row.decided_at,
        comment: row.comment,
        remark: row.remark,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Invoice::from_persisted(data))
}
