//! Round-trip tests for the requisition and purchase request repositories.

use crate::postgres::helpers::{BoxError, clock, runtime, test_database, today};
use chrono::Days;
use lavoisier::directory::domain::UserId;
use lavoisier::indent::{
    adapters::postgres::PostgresPurchaseRequestRepository,
    domain::{
        PurchaseRequest, PurchaseRequestDecision, PurchaseRequestKind, PurchaseRequestLineDraft,
        PurchaseRequestParams, PurchaseRequestStatus,
    },
    ports::PurchaseRequestRepository,
};
use lavoisier::inventory::domain::{ItemClass, StockItemId};
use lavoisier::requisition::{
    adapters::postgres::PostgresRequisitionRepository,
    domain::{
        Requisition, RequisitionDecision, RequisitionLineDraft, RequisitionParams,
        RequisitionStatus,
    },
    ports::RequisitionRepository,
};
use lavoisier::sequence::domain::{CategoryKind, CategoryRef, DocumentCode, DocumentKind};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;
use uuid::Uuid;

fn requisition() -> Result<Requisition, BoxError> {
    let code = DocumentCode::compose(DocumentKind::Requisition, today(), 1);
    Ok(Requisition::new(
        code,
        RequisitionParams {
            category: CategoryRef::new(CategoryKind::Practical, Uuid::new_v4()),
            required_by: today() + Days::new(7),
            lines: vec![RequisitionLineDraft {
                item: StockItemId::new(),
                class: ItemClass::Glasswares,
                unit: "piece".to_owned(),
                quantity_required: 4,
                description: "undergraduate practicals".to_owned(),
                remark: Some("fragile".to_owned()),
            }],
            requested_by: UserId::new(),
            remark: None,
        },
        &clock(),
    )?)
}

fn purchase_request(kind: PurchaseRequestKind) -> Result<PurchaseRequest, BoxError> {
    let code = DocumentCode::compose(kind.document_kind(), today(), 1);
    Ok(PurchaseRequest::new(
        code,
        PurchaseRequestParams {
            kind,
            category: CategoryRef::new(CategoryKind::General, Uuid::new_v4()),
            required_by: today() + Days::new(21),
            lines: vec![PurchaseRequestLineDraft {
                item_name: "UV Lamp".to_owned(),
                class: ItemClass::Equipments,
                unit: "piece".to_owned(),
                quantity: 2,
                description: Some("spectroscopy practicals".to_owned()),
                technical_details: Some("365nm, 8W".to_owned()),
                remark: None,
            }],
            requested_by: UserId::new(),
            remark: None,
        },
        &clock(),
    )?)
}

#[rstest]
fn requisitions_round_trip_through_their_lifecycle(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresRequisitionRepository::new(database.pool.clone());

    let mut stored = requisition()?;
    rt.block_on(repository.store(&stored))?;

    let found = rt
        .block_on(repository.find_by_id(stored.id()))?
        .ok_or("requisition stored")?;
    assert_eq!(found, stored);

    stored.decide(
        RequisitionDecision::Approve,
        UserId::new(),
        Some("within budget".to_owned()),
        &clock(),
    )?;
    rt.block_on(repository.update(&stored))?;

    let updated = rt
        .block_on(repository.find_by_id(stored.id()))?
        .ok_or("requisition still stored")?;
    assert_eq!(updated.status(), RequisitionStatus::Approved);
    assert_eq!(updated.remark(), Some("within budget"));
    assert_eq!(updated, stored);
    Ok(())
}

#[rstest]
fn deleted_requisitions_disappear(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresRequisitionRepository::new(database.pool.clone());

    let stored = requisition()?;
    rt.block_on(repository.store(&stored))?;
    rt.block_on(repository.remove(stored.id()))?;

    assert!(rt.block_on(repository.find_by_id(stored.id()))?.is_none());
    Ok(())
}

#[rstest]
fn both_purchase_request_flavours_share_one_table(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresPurchaseRequestRepository::new(database.pool.clone());

    let indent = purchase_request(PurchaseRequestKind::NewIndent)?;
    let order_request = purchase_request(PurchaseRequestKind::OrderRequest)?;
    rt.block_on(repository.store(&indent))?;
    rt.block_on(repository.store(&order_request))?;

    let found_indent = rt
        .block_on(repository.find_by_id(indent.id()))?
        .ok_or("indent stored")?;
    assert_eq!(found_indent, indent);
    assert_eq!(found_indent.kind(), PurchaseRequestKind::NewIndent);

    let found_order_request = rt
        .block_on(repository.find_by_id(order_request.id()))?
        .ok_or("order request stored")?;
    assert_eq!(found_order_request.kind(), PurchaseRequestKind::OrderRequest);
    Ok(())
}

#[rstest]
fn purchase_request_updates_persist_the_walk(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresPurchaseRequestRepository::new(database.pool.clone());

    let mut request = purchase_request(PurchaseRequestKind::NewIndent)?;
    rt.block_on(repository.store(&request))?;

    let approver = UserId::new();
    request.decide(PurchaseRequestDecision::Approve, approver, None, &clock())?;
    rt.block_on(repository.update(&request))?;
    request.mark_ordered(approver, &clock())?;
    rt.block_on(repository.update(&request))?;

    let updated = rt
        .block_on(repository.find_by_id(request.id()))?
        .ok_or("request still stored")?;
    assert_eq!(updated.status(), PurchaseRequestStatus::Ordered);
    assert_eq!(updated.ordered_by(), Some(approver));
    assert_eq!(updated, request);
    Ok(())
}
