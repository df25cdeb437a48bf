//! Code generation tests over the shared in-memory counter store.

use crate::in_memory::helpers::{BoxError, FixedClock, clock, runtime};
use chrono::{TimeZone, Utc};
use lavoisier::sequence::{
    adapters::memory::InMemorySequenceStore,
    domain::{CategoryKind, DocumentKind, GroupKey, InstitutionTag},
    ports::DocumentNumbering,
    services::CodeGenerator,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[rstest]
fn monthly_codes_count_per_kind_within_the_month(
    runtime: io::Result<Runtime>,
    clock: FixedClock,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let generator = CodeGenerator::new(Arc::new(InMemorySequenceStore::new()), Arc::new(clock));

    let first = rt.block_on(generator.monthly_code(DocumentKind::Requisition))?;
    let second = rt.block_on(generator.monthly_code(DocumentKind::Requisition))?;
    let indent = rt.block_on(generator.monthly_code(DocumentKind::Indent))?;

    assert_eq!(first.as_str(), "R-202508-001");
    assert_eq!(second.as_str(), "R-202508-002");
    assert_eq!(indent.as_str(), "NI-202508-001");
    Ok(())
}

#[rstest]
fn a_month_change_restarts_the_monthly_counter(
    runtime: io::Result<Runtime>,
    clock: FixedClock,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let store = Arc::new(InMemorySequenceStore::new());
    let august = CodeGenerator::new(Arc::clone(&store), Arc::new(clock));
    let september = CodeGenerator::new(
        store,
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0)
                .single()
                .ok_or("valid instant")?,
        )),
    );

    let before = rt.block_on(august.monthly_code(DocumentKind::PurchaseOrder))?;
    let after = rt.block_on(september.monthly_code(DocumentKind::PurchaseOrder))?;

    assert_eq!(before.as_str(), "PO-202508-001");
    assert_eq!(after.as_str(), "PO-202509-001");
    Ok(())
}

#[rstest]
fn order_numbers_scope_by_category_and_grouping_key(
    runtime: io::Result<Runtime>,
    clock: FixedClock,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let generator = CodeGenerator::new(Arc::new(InMemorySequenceStore::new()), Arc::new(clock));
    let key = GroupKey::new("DST22")?;

    let grouped = rt.block_on(generator.order_number(CategoryKind::Project, Some(&key)))?;
    let grouped_again = rt.block_on(generator.order_number(CategoryKind::Project, Some(&key)))?;
    let plain = rt.block_on(generator.order_number(CategoryKind::Project, None))?;
    let general = rt.block_on(generator.order_number(CategoryKind::General, None))?;

    assert_eq!(grouped.as_str(), "JAI-PROJ/DST22/001/2025-26");
    assert_eq!(grouped_again.as_str(), "JAI-PROJ/DST22/002/2025-26");
    assert_eq!(plain.as_str(), "JAI-PROJ/001/2025-26");
    assert_eq!(general.as_str(), "JAI-GENE/001/2025-26");
    Ok(())
}

#[rstest]
fn the_institution_tag_flows_into_order_numbers(
    runtime: io::Result<Runtime>,
    clock: FixedClock,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let generator = CodeGenerator::new(Arc::new(InMemorySequenceStore::new()), Arc::new(clock))
        .with_institution(InstitutionTag::new("NITW")?);

    let number = rt.block_on(generator.order_number(CategoryKind::Practical, None))?;

    assert_eq!(number.as_str(), "NITW-PRAC/001/2025-26");
    Ok(())
}
