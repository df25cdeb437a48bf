//! Requisition lifecycle tests with live stock bookkeeping.

use crate::in_memory::helpers::{BoxError, Lab, lab, runtime, today};
use chrono::Days;
use lavoisier::directory::domain::{Role, UserAccount};
use lavoisier::inventory::{
    domain::{IssueLogStatus, ItemClass, StockItem},
    ports::{IssueLogRepository, StockRepository},
};
use lavoisier::requisition::{
    domain::{
        LineIssue, LineReturn, RequisitionDecision, RequisitionLineDraft, RequisitionParams,
        RequisitionStatus,
    },
    services::RequisitionWorkflowError,
};
use lavoisier::sequence::domain::{CategoryKind, CategoryRef, DocumentKind, DocumentRef};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;
use uuid::Uuid;

struct Seeded {
    requester: UserAccount,
    approver: UserAccount,
    beakers: StockItem,
    ethanol: StockItem,
}

fn seed(rt: &Runtime, lab: &Lab) -> Result<Seeded, BoxError> {
    let requester = lab.seed_account(rt, "Asha", "asha@lab.example.org", Role::LabAssistant)?;
    let approver = lab.seed_account(rt, "Devika", "devika@lab.example.org", Role::Admin)?;
    lab.seed_account(rt, "Farhan", "farhan@lab.example.org", Role::Manager)?;
    lab.seed_account(rt, "Mira", "mira@lab.example.org", Role::Faculty)?;
    let beakers = lab.seed_item(rt, ItemClass::Glasswares, "GL-BEAK-250", "Beaker 250ml", 10)?;
    let ethanol = lab.seed_item(rt, ItemClass::Chemicals, "CH-ETOH-96", "Ethanol 96%", 40)?;
    Ok(Seeded {
        requester,
        approver,
        beakers,
        ethanol,
    })
}

fn draft(item: &StockItem, quantity: u32) -> RequisitionLineDraft {
    RequisitionLineDraft {
        item: item.id(),
        class: item.class(),
        unit: "piece".to_owned(),
        quantity_required: quantity,
        description: "undergraduate practicals".to_owned(),
        remark: None,
    }
}

fn params(seeded: &Seeded, lines: Vec<RequisitionLineDraft>) -> RequisitionParams {
    RequisitionParams {
        category: CategoryRef::new(CategoryKind::Practical, Uuid::new_v4()),
        required_by: today() + Days::new(7),
        lines,
        requested_by: seeded.requester.id(),
        remark: None,
    }
}

#[rstest]
fn creating_checks_stock_and_issues_the_monthly_code(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let seeded = seed(&rt, &lab)?;

    let requisition = rt.block_on(
        lab.requisition_workflow
            .create(params(&seeded, vec![draft(&seeded.beakers, 4)])),
    )?;

    assert_eq!(requisition.code().as_str(), "R-202508-001");
    assert_eq!(requisition.status(), RequisitionStatus::Pending);
    // Creation reserves nothing; the level only moves at issue time.
    let item = rt
        .block_on(lab.stock.find_by_id(seeded.beakers.id()))?
        .ok_or("item catalogued")?;
    assert_eq!(item.quantity(), 10);

    let titles = lab.feed_titles(&rt, Role::Admin)?;
    assert!(titles.iter().any(|title| title == "Requisition Created"));
    Ok(())
}

#[rstest]
fn creation_fails_when_stock_cannot_cover_a_line(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let seeded = seed(&rt, &lab)?;

    let error = rt
        .block_on(
            lab.requisition_workflow
                .create(params(&seeded, vec![draft(&seeded.beakers, 25)])),
        )
        .expect_err("insufficient stock");

    assert!(matches!(
        error,
        RequisitionWorkflowError::InsufficientStock {
            ref name,
            available: 10,
            requested: 25,
        } if name == "Beaker 250ml",
    ));
    assert!(lab.feed_titles(&rt, Role::Admin)?.is_empty());
    Ok(())
}

#[rstest]
fn issuing_decrements_stock_and_opens_logs_per_line(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let seeded = seed(&rt, &lab)?;
    let requisition = rt.block_on(lab.requisition_workflow.create(params(
        &seeded,
        vec![draft(&seeded.beakers, 4), draft(&seeded.ethanol, 10)],
    )))?;
    rt.block_on(lab.requisition_workflow.decide(
        requisition.id(),
        RequisitionDecision::Approve,
        seeded.approver.id(),
        None,
    ))?;

    let issues: Vec<LineIssue> = requisition
        .lines()
        .iter()
        .map(|line| LineIssue {
            line: line.id(),
            quantity: line.quantity_required(),
        })
        .collect();
    let issued = rt.block_on(lab.requisition_workflow.issue(
        requisition.id(),
        &issues,
        seeded.approver.id(),
    ))?;

    assert_eq!(issued.status(), RequisitionStatus::Issued);
    let beakers = rt
        .block_on(lab.stock.find_by_id(seeded.beakers.id()))?
        .ok_or("item catalogued")?;
    assert_eq!(beakers.quantity(), 6);
    let ethanol = rt
        .block_on(lab.stock.find_by_id(seeded.ethanol.id()))?
        .ok_or("item catalogued")?;
    assert_eq!(ethanol.quantity(), 30);

    let source = DocumentRef::new(DocumentKind::Requisition, requisition.id().into_inner());
    let logs = rt.block_on(lab.issue_logs.find_by_source(source))?;
    assert_eq!(logs.len(), 2);
    // Glassware awaits a return; the chemical was consumed on issue.
    let beaker_log = logs
        .iter()
        .find(|log| log.item() == seeded.beakers.id())
        .ok_or("beaker log opened")?;
    assert_eq!(beaker_log.status(), IssueLogStatus::Outstanding);
    let ethanol_log = logs
        .iter()
        .find(|log| log.item() == seeded.ethanol.id())
        .ok_or("ethanol log opened")?;
    assert_eq!(ethanol_log.status(), IssueLogStatus::Completed);

    let titles = lab.feed_titles(&rt, Role::Faculty)?;
    assert!(titles.iter().any(|title| title == "Requisition Issued"));
    Ok(())
}

#[rstest]
fn returning_restores_stock_and_closes_the_log(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let seeded = seed(&rt, &lab)?;
    let requisition = rt.block_on(
        lab.requisition_workflow
            .create(params(&seeded, vec![draft(&seeded.beakers, 4)])),
    )?;
    rt.block_on(lab.requisition_workflow.decide(
        requisition.id(),
        RequisitionDecision::Approve,
        seeded.approver.id(),
        None,
    ))?;
    let line = requisition.lines().first().ok_or("line present")?.id();
    rt.block_on(lab.requisition_workflow.issue(
        requisition.id(),
        &[LineIssue {
            line,
            quantity: 4,
        }],
        seeded.approver.id(),
    ))?;

    let returned = rt.block_on(lab.requisition_workflow.mark_returned(
        requisition.id(),
        &[LineReturn {
            line,
            returned: 3,
            lost_or_damaged: 1,
        }],
    ))?;

    assert_eq!(returned.status(), RequisitionStatus::Returned);
    // 10 - 4 issued + 3 returned; the broken unit stays gone.
    let item = rt
        .block_on(lab.stock.find_by_id(seeded.beakers.id()))?
        .ok_or("item catalogued")?;
    assert_eq!(item.quantity(), 9);

    let source = DocumentRef::new(DocumentKind::Requisition, requisition.id().into_inner());
    let logs = rt.block_on(lab.issue_logs.find_by_source(source))?;
    let log = logs.first().ok_or("log present")?;
    assert_eq!(log.status(), IssueLogStatus::Returned);
    assert_eq!(log.returned(), 3);
    assert_eq!(log.lost_or_damaged(), 1);

    let titles = lab.feed_titles(&rt, Role::Manager)?;
    assert!(titles.iter().any(|title| title == "Requisition Returned"));
    Ok(())
}

#[rstest]
fn a_decided_requisition_cannot_be_amended(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let seeded = seed(&rt, &lab)?;
    let requisition = rt.block_on(
        lab.requisition_workflow
            .create(params(&seeded, vec![draft(&seeded.beakers, 4)])),
    )?;
    rt.block_on(lab.requisition_workflow.decide(
        requisition.id(),
        RequisitionDecision::Reject,
        seeded.approver.id(),
        Some("duplicate of last week's request".to_owned()),
    ))?;

    let error = rt
        .block_on(lab.requisition_workflow.delete(
            requisition.id(),
            seeded.requester.id(),
        ))
        .expect_err("not deletable");

    assert!(matches!(
        error,
        RequisitionWorkflowError::Domain(_),
    ));
    Ok(())
}
