//! Tests for [`PostgresSequenceStore`].

use crate::postgres::helpers::{BoxError, clock, runtime, test_database, today};
use lavoisier::sequence::{
    adapters::postgres::PostgresSequenceStore,
    domain::{DocumentKind, SequencePrefix},
    ports::{DocumentNumbering, SequenceStore},
    services::CodeGenerator,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[rstest]
fn counters_advance_independently_per_prefix(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let store = PostgresSequenceStore::new(database.pool.clone());

    let requisitions = SequencePrefix::monthly(DocumentKind::Requisition, today());
    let orders = SequencePrefix::monthly(DocumentKind::PurchaseOrder, today());

    assert_eq!(rt.block_on(store.next(&requisitions))?, 1);
    assert_eq!(rt.block_on(store.next(&requisitions))?, 2);
    assert_eq!(rt.block_on(store.next(&orders))?, 1);
    assert_eq!(rt.block_on(store.next(&requisitions))?, 3);
    Ok(())
}

#[rstest]
fn the_generator_composes_codes_from_stored_counters(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let generator = CodeGenerator::new(
        Arc::new(PostgresSequenceStore::new(database.pool.clone())),
        Arc::new(clock()),
    );

    let first = rt.block_on(generator.monthly_code(DocumentKind::Inward))?;
    let second = rt.block_on(generator.monthly_code(DocumentKind::Inward))?;

    assert_eq!(first.as_str(), "INW-202508-001");
    assert_eq!(second.as_str(), "INW-202508-002");
    Ok(())
}
