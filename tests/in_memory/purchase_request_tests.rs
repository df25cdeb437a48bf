//! Purchase request lifecycle tests over the shared wiring.

use crate::in_memory::helpers::{BoxError, Lab, lab, runtime, today};
use chrono::Days;
use lavoisier::directory::domain::{Role, UserAccount};
use lavoisier::indent::domain::{
    PurchaseRequestDecision, PurchaseRequestKind, PurchaseRequestLineDraft, PurchaseRequestParams,
    PurchaseRequestStatus,
};
use lavoisier::inventory::domain::ItemClass;
use lavoisier::sequence::domain::{CategoryKind, CategoryRef};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;
use uuid::Uuid;

struct Seeded {
    requester: UserAccount,
    approver: UserAccount,
}

fn seed(rt: &Runtime, lab: &Lab) -> Result<Seeded, BoxError> {
    let requester = lab.seed_account(rt, "Mira", "mira@lab.example.org", Role::Faculty)?;
    let approver = lab.seed_account(rt, "Devika", "devika@lab.example.org", Role::Admin)?;
    lab.seed_account(rt, "Asha", "asha@lab.example.org", Role::LabAssistant)?;
    lab.seed_account(rt, "Tanvir", "tanvir@lab.example.org", Role::Stores)?;
    Ok(Seeded {
        requester,
        approver,
    })
}

fn params(seeded: &Seeded, kind: PurchaseRequestKind, item: &str) -> PurchaseRequestParams {
    PurchaseRequestParams {
        kind,
        category: CategoryRef::new(CategoryKind::General, Uuid::new_v4()),
        required_by: today() + Days::new(21),
        lines: vec![PurchaseRequestLineDraft {
            item_name: item.to_owned(),
            class: ItemClass::Equipments,
            unit: "piece".to_owned(),
            quantity: 1,
            description: Some("spectroscopy practicals".to_owned()),
            technical_details: None,
            remark: None,
        }],
        requested_by: seeded.requester.id(),
        remark: None,
    }
}

#[rstest]
fn the_two_flavours_and_requisitions_count_independently(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let seeded = seed(&rt, &lab)?;

    let indent = rt.block_on(
        lab.request_workflow
            .create(params(&seeded, PurchaseRequestKind::NewIndent, "UV Lamp")),
    )?;
    let second_indent = rt.block_on(lab.request_workflow.create(params(
        &seeded,
        PurchaseRequestKind::NewIndent,
        "Cuvette Set",
    )))?;
    let order_request = rt.block_on(lab.request_workflow.create(params(
        &seeded,
        PurchaseRequestKind::OrderRequest,
        "Acetone",
    )))?;

    assert_eq!(indent.code().as_str(), "NI-202508-001");
    assert_eq!(second_indent.code().as_str(), "NI-202508-002");
    assert_eq!(order_request.code().as_str(), "O-202508-001");
    Ok(())
}

#[rstest]
fn the_full_walk_ends_issued_with_the_stores_notified(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let seeded = seed(&rt, &lab)?;
    let created = rt.block_on(
        lab.request_workflow
            .create(params(&seeded, PurchaseRequestKind::NewIndent, "UV Lamp")),
    )?;

    rt.block_on(lab.request_workflow.decide(
        created.id(),
        PurchaseRequestDecision::Approve,
        seeded.approver.id(),
        Some("within budget".to_owned()),
    ))?;
    rt.block_on(
        lab.request_workflow
            .mark_ordered(created.id(), seeded.approver.id()),
    )?;
    let issued = rt.block_on(lab.request_workflow.mark_issued(created.id()))?;

    assert_eq!(issued.status(), PurchaseRequestStatus::Issued);
    let titles = lab.feed_titles(&rt, Role::Stores)?;
    assert!(titles.iter().any(|title| title == "New Indent Ordered"));
    assert!(titles.iter().any(|title| title == "New Indent Issued"));
    Ok(())
}

#[rstest]
fn rejection_reaches_the_faculty_requester_only(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let seeded = seed(&rt, &lab)?;
    let created = rt.block_on(lab.request_workflow.create(params(
        &seeded,
        PurchaseRequestKind::OrderRequest,
        "Acetone",
    )))?;

    let rejected = rt.block_on(lab.request_workflow.decide(
        created.id(),
        PurchaseRequestDecision::Reject,
        seeded.approver.id(),
        Some("no budget this quarter".to_owned()),
    ))?;

    assert_eq!(rejected.status(), PurchaseRequestStatus::Rejected);
    let faculty = lab.feed_titles(&rt, Role::Faculty)?;
    assert!(faculty.iter().any(|title| title == "Order Request Rejected"));
    let assistants = lab.feed_titles(&rt, Role::LabAssistant)?;
    assert!(!assistants.iter().any(|title| title == "Order Request Rejected"));
    Ok(())
}
