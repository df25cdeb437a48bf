//! Tests for the purchase order and invoice repositories.

use crate::postgres::helpers::{BoxError, clock, runtime, test_database, today};
use chrono::Days;
use lavoisier::directory::domain::UserId;
use lavoisier::inventory::domain::{ItemClass, StockItemId};
use lavoisier::ordering::{
    adapters::postgres::{PostgresInvoiceRepository, PostgresOrderRepository},
    domain::{
        Invoice, InvoiceDecision, InvoiceParams, InvoiceStatus, Money, OrderDecision,
        OrderLineDraft, OrderStatus, PurchaseOrder, PurchaseOrderParams, VendorId,
    },
    ports::{InvoiceRepository, InvoiceRepositoryError, OrderRepository},
};
use lavoisier::sequence::domain::{
    CategoryKind, CategoryRef, DocumentCode, DocumentKind, FinancialYear, GroupKey, InstitutionTag,
    OrderNumber,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;
use uuid::Uuid;

fn order_numbers(counter: u64) -> Result<(DocumentCode, OrderNumber), BoxError> {
    let po_number = DocumentCode::compose(DocumentKind::PurchaseOrder, today(), counter);
    let order_number = OrderNumber::compose(
        &InstitutionTag::default(),
        CategoryKind::Project,
        Some(&GroupKey::new("DST22")?),
        counter,
        FinancialYear::from_date(today()),
    );
    Ok((po_number, order_number))
}

fn order(counter: u64) -> Result<PurchaseOrder, BoxError> {
    let (po_number, order_number) = order_numbers(counter)?;
    Ok(PurchaseOrder::new(
        po_number,
        order_number,
        PurchaseOrderParams {
            category: CategoryRef::new(CategoryKind::Project, Uuid::new_v4()),
            vendor: VendorId::from_uuid(Uuid::new_v4()),
            quotation_ref: "Q-4821".to_owned(),
            quotation_date: today() - Days::new(3),
            lines: vec![OrderLineDraft {
                entry_number: 1,
                description: "Digital pH meter".to_owned(),
                class: ItemClass::Equipments,
                item: StockItemId::new(),
                cas_number: None,
                make: Some("Systronics".to_owned()),
                quantity: 2,
                rate: Money::from_paise(50_000),
                discount_bp: 0,
                gst_bp: 1_800,
                cost: Money::from_paise(100_000),
            }],
            total_cost: Money::from_paise(100_000),
            total_gst: Money::from_paise(18_000),
            grand_total: Money::from_paise(118_000),
            notes: Some("Quote valid until month end".to_owned()),
            created_by: UserId::new(),
        },
        &clock(),
    )?)
}

fn invoice(order: &PurchaseOrder, bill_number: u64) -> Result<Invoice, BoxError> {
    Ok(Invoice::new(
        InvoiceParams {
            order: order.id(),
            bill_number,
            bill_date: today(),
            amount: Money::from_paise(118_000),
            comment: Some("First of a single instalment".to_owned()),
            created_by: UserId::new(),
        },
        &clock(),
    )?)
}

#[rstest]
fn orders_round_trip_with_their_priced_lines(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresOrderRepository::new(database.pool.clone());

    let stored = order(1)?;
    rt.block_on(repository.store(&stored))?;

    let found = rt
        .block_on(repository.find_by_id(stored.id()))?
        .ok_or("order stored")?;
    assert_eq!(found, stored);
    assert_eq!(found.order_number().as_str(), "JAI-PROJ/DST22/001/2025-26");
    assert_eq!(found.lines().len(), 1);
    assert_eq!(found.grand_total(), Money::from_paise(118_000));
    Ok(())
}

#[rstest]
fn order_updates_persist_the_walk_to_received(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresOrderRepository::new(database.pool.clone());

    let mut stored = order(1)?;
    rt.block_on(repository.store(&stored))?;

    let approver = UserId::new();
    stored.decide(OrderDecision::Approve, approver, None, &clock())?;
    rt.block_on(repository.update(&stored))?;
    stored.mark_placed(Some("couriered to vendor".to_owned()), &clock())?;
    rt.block_on(repository.update(&stored))?;
    stored.mark_received(None, &clock())?;
    rt.block_on(repository.update(&stored))?;

    let updated = rt
        .block_on(repository.find_by_id(stored.id()))?
        .ok_or("order still stored")?;
    assert_eq!(updated.status(), OrderStatus::Received);
    assert_eq!(updated.approved_by(), Some(approver));
    assert_eq!(updated.remark(), Some("couriered to vendor"));
    assert_eq!(updated, stored);
    Ok(())
}

#[rstest]
fn invoices_list_against_their_order(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let orders = PostgresOrderRepository::new(database.pool.clone());
    let invoices = PostgresInvoiceRepository::new(database.pool.clone());

    let first_order = order(1)?;
    let second_order = order(2)?;
    rt.block_on(orders.store(&first_order))?;
    rt.block_on(orders.store(&second_order))?;

    rt.block_on(invoices.store(&invoice(&first_order, 88_412)?))?;
    rt.block_on(invoices.store(&invoice(&first_order, 88_413)?))?;
    rt.block_on(invoices.store(&invoice(&second_order, 88_414)?))?;

    let listed = rt.block_on(invoices.find_by_order(first_order.id()))?;
    let mut bill_numbers: Vec<u64> = listed.iter().map(Invoice::bill_number).collect();
    bill_numbers.sort_unstable();
    assert_eq!(bill_numbers, vec![88_412, 88_413]);
    Ok(())
}

#[rstest]
fn the_unique_index_rejects_a_reused_bill_number(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let orders = PostgresOrderRepository::new(database.pool.clone());
    let invoices = PostgresInvoiceRepository::new(database.pool.clone());

    let stored = order(1)?;
    rt.block_on(orders.store(&stored))?;
    rt.block_on(invoices.store(&invoice(&stored, 88_412)?))?;

    let error = rt
        .block_on(invoices.store(&invoice(&stored, 88_412)?))
        .expect_err("bill numbers are unique");
    assert!(matches!(
        error,
        InvoiceRepositoryError::DuplicateBillNumber(88_412),
    ));
    Ok(())
}

#[rstest]
fn invoice_decisions_persist_through_hold_and_approval(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let orders = PostgresOrderRepository::new(database.pool.clone());
    let invoices = PostgresInvoiceRepository::new(database.pool.clone());

    let stored_order = order(1)?;
    rt.block_on(orders.store(&stored_order))?;
    let mut stored = invoice(&stored_order, 88_412)?;
    rt.block_on(invoices.store(&stored))?;

    let approver = UserId::new();
    stored.decide(
        InvoiceDecision::Hold,
        approver,
        Some("awaiting delivery challan".to_owned()),
        &clock(),
    )?;
    rt.block_on(invoices.update(&stored))?;
    stored.decide(InvoiceDecision::Approve, approver, None, &clock())?;
    rt.block_on(invoices.update(&stored))?;

    let updated = rt
        .block_on(invoices.find_by_id(stored.id()))?
        .ok_or("invoice still stored")?;
    assert_eq!(updated.status(), InvoiceStatus::Approved);
    assert_eq!(updated.approved_by(), Some(approver));
    assert_eq!(updated, stored);
    Ok(())
}
