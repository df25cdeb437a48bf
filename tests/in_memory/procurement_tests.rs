//! Purchase order and invoice tests over the shared wiring.

use crate::in_memory::helpers::{BoxError, Lab, lab, runtime, today};
use chrono::Days;
use lavoisier::directory::domain::{Role, UserAccount};
use lavoisier::inventory::domain::{ItemClass, StockItemId};
use lavoisier::ordering::{
    domain::{
        InvoiceDecision, InvoiceParams, InvoiceStatus, Money, OrderDecision, OrderLineDraft,
        OrderStatus, PurchaseOrderParams, VendorId,
    },
    ports::InvoiceRepositoryError,
    services::ProcurementWorkflowError,
};
use lavoisier::sequence::domain::{CategoryKind, CategoryRef, GroupKey};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;
use uuid::Uuid;

struct Seeded {
    creator: UserAccount,
    approver: UserAccount,
}

fn seed(rt: &Runtime, lab: &Lab) -> Result<Seeded, BoxError> {
    let creator = lab.seed_account(rt, "Tanvir", "tanvir@lab.example.org", Role::Stores)?;
    let approver = lab.seed_account(rt, "Devika", "devika@lab.example.org", Role::Admin)?;
    lab.seed_account(rt, "Farhan", "farhan@lab.example.org", Role::Manager)?;
    Ok(Seeded { creator, approver })
}

fn params(seeded: &Seeded, kind: CategoryKind) -> PurchaseOrderParams {
    PurchaseOrderParams {
        category: CategoryRef::new(kind, Uuid::new_v4()),
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
        notes: None,
        created_by: seeded.creator.id(),
    }
}

fn invoice_params(seeded: &Seeded, order: &lavoisier::ordering::domain::PurchaseOrder) -> InvoiceParams {
    InvoiceParams {
        order: order.id(),
        bill_number: 88_412,
        bill_date: today(),
        amount: Money::from_paise(118_000),
        comment: None,
        created_by: seeded.creator.id(),
    }
}

#[rstest]
fn a_fresh_order_carries_both_generated_numbers(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let seeded = seed(&rt, &lab)?;
    let key = GroupKey::new("DST22")?;

    let grouped = rt.block_on(
        lab.procurement
            .create_order(params(&seeded, CategoryKind::Project), Some(&key)),
    )?;
    let plain = rt.block_on(
        lab.procurement
            .create_order(params(&seeded, CategoryKind::General), None),
    )?;

    assert_eq!(grouped.po_number().as_str(), "PO-202508-001");
    assert_eq!(grouped.order_number().as_str(), "JAI-PROJ/DST22/001/2025-26");
    assert_eq!(plain.po_number().as_str(), "PO-202508-002");
    assert_eq!(plain.order_number().as_str(), "JAI-GENE/001/2025-26");

    let titles = lab.feed_titles(&rt, Role::Admin)?;
    assert_eq!(
        titles
            .iter()
            .filter(|title| title.as_str() == "Order Created")
            .count(),
        // The second fan-out is a same-day duplicate of the first.
        1,
    );
    Ok(())
}

#[rstest]
fn the_order_walk_runs_approve_place_receive(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let seeded = seed(&rt, &lab)?;
    let order = rt.block_on(
        lab.procurement
            .create_order(params(&seeded, CategoryKind::General), None),
    )?;

    rt.block_on(lab.procurement.decide_order(
        order.id(),
        OrderDecision::Approve,
        seeded.approver.id(),
        None,
    ))?;
    rt.block_on(
        lab.procurement
            .place_order(order.id(), Some("couriered to vendor".to_owned())),
    )?;
    let received = rt.block_on(lab.procurement.receive_order(order.id(), None))?;

    assert_eq!(received.status(), OrderStatus::Received);
    assert_eq!(received.remark(), Some("couriered to vendor"));
    Ok(())
}

#[rstest]
fn invoices_attach_to_their_order_and_reject_reused_bill_numbers(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let seeded = seed(&rt, &lab)?;
    let order = rt.block_on(
        lab.procurement
            .create_order(params(&seeded, CategoryKind::General), None),
    )?;

    let invoice = rt.block_on(lab.procurement.create_invoice(invoice_params(&seeded, &order)))?;
    assert_eq!(invoice.status(), InvoiceStatus::Pending);

    let error = rt
        .block_on(lab.procurement.create_invoice(invoice_params(&seeded, &order)))
        .expect_err("bill number reused");
    assert!(matches!(
        error,
        ProcurementWorkflowError::InvoiceRepository(InvoiceRepositoryError::DuplicateBillNumber(
            88_412,
        )),
    ));

    let listed = rt.block_on(lab.procurement.invoices_for_order(order.id()))?;
    assert_eq!(listed.len(), 1);
    Ok(())
}

#[rstest]
fn an_invoice_can_be_held_then_approved(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let seeded = seed(&rt, &lab)?;
    let order = rt.block_on(
        lab.procurement
            .create_order(params(&seeded, CategoryKind::General), None),
    )?;
    let invoice = rt.block_on(lab.procurement.create_invoice(invoice_params(&seeded, &order)))?;

    rt.block_on(lab.procurement.decide_invoice(
        invoice.id(),
        InvoiceDecision::Hold,
        seeded.approver.id(),
        Some("awaiting delivery challan".to_owned()),
    ))?;
    let approved = rt.block_on(lab.procurement.decide_invoice(
        invoice.id(),
        InvoiceDecision::Approve,
        seeded.approver.id(),
        None,
    ))?;

    assert_eq!(approved.status(), InvoiceStatus::Approved);
    let titles = lab.feed_titles(&rt, Role::Manager)?;
    assert!(titles.iter().any(|title| title == "Invoice On Hold"));
    assert!(titles.iter().any(|title| title == "Invoice Approved"));
    Ok(())
}
