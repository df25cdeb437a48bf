//! Maintenance scan tests over the in-memory inventory adapters.

use crate::in_memory::helpers::{BoxError, Lab, lab, runtime, today};
use chrono::{Days, NaiveDate};
use lavoisier::directory::domain::Role;
use lavoisier::inventory::{
    domain::{ItemClass, RestockParams, StockItemId},
    ports::StockRepository,
    services::MaintenanceScanOutcome,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;
use uuid::Uuid;

fn restock_params(
    item: StockItemId,
    actor: lavoisier::directory::domain::UserId,
    maintenance_date: Option<NaiveDate>,
) -> RestockParams {
    RestockParams {
        item,
        quantity: 1,
        unit: "piece".to_owned(),
        description: Some("annual procurement".to_owned()),
        grade: None,
        cas_number: None,
        hazard_class: None,
        vendor: Some(Uuid::new_v4()),
        invoice_reference: Some("INV-2025-118".to_owned()),
        expiry_date: None,
        maintenance_date,
        recorded_by: actor,
    }
}

fn seed_admin_and_assistant(rt: &Runtime, lab: &Lab) -> Result<(), BoxError> {
    lab.seed_account(rt, "Devika", "devika@lab.example.org", Role::Admin)?;
    lab.seed_account(rt, "Asha", "asha@lab.example.org", Role::LabAssistant)?;
    lab.seed_account(rt, "Farhan", "farhan@lab.example.org", Role::Manager)?;
    Ok(())
}

#[rstest]
fn an_inward_entry_counts_stock_up_and_notifies(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    seed_admin_and_assistant(&rt, &lab)?;
    let recorder = lab.seed_account(&rt, "Tanvir", "tanvir@lab.example.org", Role::Stores)?;
    let item = lab.seed_item(&rt, ItemClass::Equipments, "EQ-PHM-01", "Digital pH Meter", 1)?;

    let restock = rt.block_on(
        lab.restocking
            .record_restock(restock_params(item.id(), recorder.id(), None)),
    )?;

    assert_eq!(restock.code().as_str(), "INW-202508-001");
    let updated = rt
        .block_on(lab.stock.find_by_id(item.id()))?
        .ok_or("item catalogued")?;
    assert_eq!(updated.quantity(), 2);
    let titles = lab.feed_titles(&rt, Role::Admin)?;
    assert!(titles.iter().any(|title| title == "Inward Created"));
    Ok(())
}

#[rstest]
fn a_due_maintenance_date_raises_a_reminder(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    seed_admin_and_assistant(&rt, &lab)?;
    let recorder = lab.seed_account(&rt, "Tanvir", "tanvir@lab.example.org", Role::Stores)?;
    let item = lab.seed_item(&rt, ItemClass::Equipments, "EQ-PHM-01", "Digital pH Meter", 1)?;
    rt.block_on(lab.restocking.record_restock(restock_params(
        item.id(),
        recorder.id(),
        Some(today() + Days::new(2)),
    )))?;

    let outcome = rt.block_on(lab.scanner.run_once())?;

    assert_eq!(
        outcome,
        MaintenanceScanOutcome {
            due: 1,
            published: 1,
            suppressed: 0,
        },
    );
    let titles = lab.feed_titles(&rt, Role::LabAssistant)?;
    assert!(
        titles
            .iter()
            .any(|title| title == "Maintenance Due: Digital pH Meter"),
    );
    Ok(())
}

#[rstest]
fn a_repeated_pass_on_the_same_day_is_suppressed(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    seed_admin_and_assistant(&rt, &lab)?;
    let recorder = lab.seed_account(&rt, "Tanvir", "tanvir@lab.example.org", Role::Stores)?;
    let item = lab.seed_item(&rt, ItemClass::Equipments, "EQ-PHM-01", "Digital pH Meter", 1)?;
    rt.block_on(lab.restocking.record_restock(restock_params(
        item.id(),
        recorder.id(),
        Some(today()),
    )))?;

    rt.block_on(lab.scanner.run_once())?;
    let second = rt.block_on(lab.scanner.run_once())?;

    assert_eq!(
        second,
        MaintenanceScanOutcome {
            due: 1,
            published: 0,
            suppressed: 1,
        },
    );
    Ok(())
}

#[rstest]
fn dates_outside_the_window_stay_silent(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    seed_admin_and_assistant(&rt, &lab)?;
    let recorder = lab.seed_account(&rt, "Tanvir", "tanvir@lab.example.org", Role::Stores)?;
    let item = lab.seed_item(&rt, ItemClass::Equipments, "EQ-PHM-01", "Digital pH Meter", 1)?;
    rt.block_on(lab.restocking.record_restock(restock_params(
        item.id(),
        recorder.id(),
        Some(today() + Days::new(10)),
    )))?;

    let outcome = rt.block_on(lab.scanner.run_once())?;

    assert_eq!(outcome, MaintenanceScanOutcome::default());
    assert!(
        !lab.feed_titles(&rt, Role::LabAssistant)?
            .iter()
            .any(|title| title.starts_with("Maintenance Due")),
    );
    Ok(())
}
