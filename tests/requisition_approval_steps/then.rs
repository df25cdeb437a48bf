//! Then steps for requisition approval BDD scenarios.

use super::world::{RequisitionWorld, run_async};
use lavoisier::directory::domain::Role;
use lavoisier::requisition::{
    domain::{RequisitionDomainError, RequisitionStatus},
    services::RequisitionWorkflowError,
};
use rstest_bdd_macros::then;

fn decided_status(world: &RequisitionWorld) -> Result<RequisitionStatus, eyre::Report> {
    let result = world
        .last_decide_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing decision result in scenario world"))?;
    match result {
        Ok(requisition) => Ok(requisition.status()),
        Err(err) => Err(eyre::eyre!("unexpected decision failure: {err}")),
    }
}

#[then("the requisition is approved")]
fn requisition_is_approved(world: &RequisitionWorld) -> Result<(), eyre::Report> {
    let status = decided_status(world)?;
    if status != RequisitionStatus::Approved {
        return Err(eyre::eyre!("expected approved status, got {status:?}"));
    }
    Ok(())
}

#[then("the requisition is rejected")]
fn requisition_is_rejected(world: &RequisitionWorld) -> Result<(), eyre::Report> {
    let status = decided_status(world)?;
    if status != RequisitionStatus::Rejected {
        return Err(eyre::eyre!("expected rejected status, got {status:?}"));
    }
    Ok(())
}

#[then(r#"the lab assistants see "{title}" on their feed"#)]
fn lab_assistants_see(world: &RequisitionWorld, title: String) -> Result<(), eyre::Report> {
    let feed = run_async(world.fanout.feed_for_roles(&[Role::LabAssistant]))
        .map_err(|err| eyre::eyre!("feed lookup failed: {err}"))?;
    if !feed.iter().any(|notification| notification.title() == title) {
        return Err(eyre::eyre!("expected '{title}' on the lab assistant feed"));
    }
    Ok(())
}

#[then("the decision is refused as an invalid transition")]
fn decision_refused(world: &RequisitionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_decide_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing decision result in scenario world"))?;
    if !matches!(
        result,
        Err(RequisitionWorkflowError::Domain(
            RequisitionDomainError::InvalidTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected an invalid transition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("creation is refused for insufficient stock")]
fn creation_refused(world: &RequisitionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation result in scenario world"))?;
    if !matches!(
        result,
        Err(RequisitionWorkflowError::InsufficientStock { .. })
    ) {
        return Err(eyre::eyre!(
            "expected an insufficient stock error, got {result:?}"
        ));
    }
    Ok(())
}
