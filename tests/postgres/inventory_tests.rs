//! Tests for the stock, restock, and issue log repositories.

use crate::postgres::helpers::{BoxError, clock, runtime, test_database, today};
use chrono::Days;
use lavoisier::directory::domain::{EmailAddress, UserId};
use lavoisier::inventory::{
    adapters::postgres::{
        PostgresIssueLogRepository, PostgresRestockRepository, PostgresStockRepository,
    },
    domain::{
        IssueLog, IssueLogStatus, ItemClass, MaintenanceWindow, Restock, RestockParams, StockItem,
    },
    ports::{IssueLogRepository, RestockRepository, StockRepository, StockRepositoryError},
};
use lavoisier::sequence::domain::{DocumentCode, DocumentKind, DocumentRef};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;
use uuid::Uuid;

fn item(code: &str, name: &str, quantity: u32) -> Result<StockItem, BoxError> {
    Ok(StockItem::new(
        ItemClass::Equipments,
        code,
        name,
        "piece",
        quantity,
        &clock(),
    )?)
}

fn restock(
    item: &StockItem,
    counter: u64,
    maintenance_date: Option<chrono::NaiveDate>,
) -> Result<Restock, BoxError> {
    let code = DocumentCode::compose(DocumentKind::Inward, today(), counter);
    Ok(Restock::new(
        code,
        RestockParams {
            item: item.id(),
            quantity: 1,
            unit: "piece".to_owned(),
            description: Some("annual procurement".to_owned()),
            grade: None,
            cas_number: None,
            hazard_class: None,
            vendor: Some(Uuid::new_v4()),
            invoice_reference: Some("B-2214".to_owned()),
            expiry_date: None,
            maintenance_date,
            recorded_by: UserId::new(),
        },
        &clock(),
    )?)
}

#[rstest]
fn stock_items_round_trip_and_track_their_level(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresStockRepository::new(database.pool.clone());

    let mut stored = item("EQ-0042", "Digital pH Meter", 3)?;
    rt.block_on(repository.store(&stored))?;

    let by_id = rt
        .block_on(repository.find_by_id(stored.id()))?
        .ok_or("item stored")?;
    assert_eq!(by_id, stored);

    let by_code = rt
        .block_on(repository.find_by_code("EQ-0042"))?
        .ok_or("item found by code")?;
    assert_eq!(by_code.id(), stored.id());

    stored.receive(2, &clock())?;
    stored.issue(1, &clock())?;
    rt.block_on(repository.update(&stored))?;

    let updated = rt
        .block_on(repository.find_by_id(stored.id()))?
        .ok_or("item still stored")?;
    assert_eq!(updated.quantity(), 4);
    Ok(())
}

#[rstest]
fn a_reused_catalogue_code_is_rejected(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresStockRepository::new(database.pool.clone());

    rt.block_on(repository.store(&item("EQ-0042", "Digital pH Meter", 3)?))?;
    let error = rt
        .block_on(repository.store(&item("EQ-0042", "Another Meter", 1)?))
        .expect_err("unique code index");

    assert!(matches!(
        error,
        StockRepositoryError::DuplicateItemCode(ref code) if code == "EQ-0042",
    ));
    Ok(())
}

#[rstest]
fn restocks_round_trip_with_their_paperwork(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let stock = PostgresStockRepository::new(database.pool.clone());
    let restocks = PostgresRestockRepository::new(database.pool.clone());

    let catalogued = item("EQ-0042", "Digital pH Meter", 3)?;
    rt.block_on(stock.store(&catalogued))?;

    let stored = restock(&catalogued, 1, Some(today() + Days::new(2)))?;
    rt.block_on(restocks.store(&stored))?;

    let found = rt
        .block_on(restocks.find_by_id(stored.id()))?
        .ok_or("restock stored")?;
    assert_eq!(found, stored);
    assert_eq!(found.code().as_str(), "INW-202508-001");
    assert_eq!(found.invoice_reference(), Some("B-2214"));
    Ok(())
}

#[rstest]
fn the_maintenance_query_honours_the_window(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let stock = PostgresStockRepository::new(database.pool.clone());
    let restocks = PostgresRestockRepository::new(database.pool.clone());

    let catalogued = item("EQ-0042", "Digital pH Meter", 3)?;
    rt.block_on(stock.store(&catalogued))?;

    let inside = restock(&catalogued, 1, Some(today() + Days::new(2)))?;
    let behind = restock(&catalogued, 2, Some(today() - Days::new(3)))?;
    let too_far = restock(&catalogued, 3, Some(today() + Days::new(10)))?;
    let undated = restock(&catalogued, 4, None)?;
    for entry in [&inside, &behind, &too_far, &undated] {
        rt.block_on(restocks.store(entry))?;
    }

    let due = rt.block_on(restocks.maintenance_due(&MaintenanceWindow::around(today())))?;
    let mut due_ids: Vec<_> = due.iter().map(Restock::id).collect();
    due_ids.sort_unstable_by_key(|id| id.into_inner());
    let mut expected = vec![inside.id(), behind.id()];
    expected.sort_unstable_by_key(|id| id.into_inner());
    assert_eq!(due_ids, expected);
    Ok(())
}

#[rstest]
fn issue_logs_round_trip_and_close(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let stock = PostgresStockRepository::new(database.pool.clone());
    let logs = PostgresIssueLogRepository::new(database.pool.clone());

    let catalogued = item("GL-0007", "Beaker 250ml", 10)?;
    rt.block_on(stock.store(&catalogued))?;

    let source = DocumentRef::new(DocumentKind::Requisition, Uuid::new_v4());
    let mut stored = IssueLog::open(
        catalogued.id(),
        source,
        4,
        EmailAddress::new("asha@lab.example.org")?,
        false,
        &clock(),
    )?;
    rt.block_on(logs.store(&stored))?;

    let by_source = rt.block_on(logs.find_by_source(source))?;
    assert_eq!(by_source.len(), 1);
    assert_eq!(by_source.first().map(IssueLog::id), Some(stored.id()));

    stored.close(3, 1, &clock())?;
    rt.block_on(logs.update(&stored))?;

    let updated = rt
        .block_on(logs.find_by_id(stored.id()))?
        .ok_or("log still stored")?;
    assert_eq!(updated.status(), IssueLogStatus::Returned);
    assert_eq!(updated.returned(), 3);
    assert_eq!(updated.lost_or_damaged(), 1);
    assert_eq!(updated, stored);
    Ok(())
}
