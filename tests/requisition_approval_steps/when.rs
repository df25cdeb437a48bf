//! When steps for requisition approval BDD scenarios.

use super::world::{RequisitionWorld, run_async};
use lavoisier::requisition::domain::RequisitionDecision;
use rstest_bdd_macros::when;

fn decide(world: &mut RequisitionWorld, decision: RequisitionDecision) -> Result<(), eyre::Report> {
    let requisition = world
        .requisition
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no requisition in scenario world"))?;
    let approver = world
        .approver
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no approver in scenario world"))?;
    world.last_decide_result = Some(run_async(world.workflow.decide(
        requisition.id(),
        decision,
        approver.id(),
        None,
    )));
    Ok(())
}

#[when("the administrator approves the requisition")]
fn administrator_approves(world: &mut RequisitionWorld) -> Result<(), eyre::Report> {
    decide(world, RequisitionDecision::Approve)
}

#[when("the administrator rejects the requisition")]
fn administrator_rejects(world: &mut RequisitionWorld) -> Result<(), eyre::Report> {
    decide(world, RequisitionDecision::Reject)
}

#[when(r#"a requisition for {quantity:u32} units of "{name}" is raised"#)]
fn a_requisition_is_raised(
    world: &mut RequisitionWorld,
    quantity: u32,
    name: String,
) -> Result<(), eyre::Report> {
    let params = world.single_line_params(&name, quantity)?;
    world.last_create_result = Some(run_async(world.workflow.create(params)));
    Ok(())
}
