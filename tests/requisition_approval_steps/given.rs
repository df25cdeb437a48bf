//! Given steps for requisition approval BDD scenarios.

use super::world::{RequisitionWorld, run_async};
use lavoisier::directory::domain::Role;
use lavoisier::requisition::domain::RequisitionDecision;
use rstest_bdd_macros::given;

#[given(r#"a laboratory stocked with {quantity:u32} units of "{name}""#)]
fn a_stocked_laboratory(
    world: &mut RequisitionWorld,
    quantity: u32,
    name: String,
) -> Result<(), eyre::Report> {
    world.requester = Some(world.seed_account("Asha", "asha@lab.example.org", Role::LabAssistant)?);
    world.approver = Some(world.seed_account("Devika", "devika@lab.example.org", Role::Admin)?);
    world.seed_account("Farhan", "farhan@lab.example.org", Role::Manager)?;
    world.seed_item(&name, quantity)?;
    Ok(())
}

#[given(r#"a pending requisition for {quantity:u32} units of "{name}""#)]
fn a_pending_requisition(
    world: &mut RequisitionWorld,
    quantity: u32,
    name: String,
) -> Result<(), eyre::Report> {
    let params = world.single_line_params(&name, quantity)?;
    let requisition = run_async(world.workflow.create(params))
        .map_err(|err| eyre::eyre!("create requisition: {err}"))?;
    world.requisition = Some(requisition);
    Ok(())
}

#[given("the requisition has already been rejected")]
fn already_rejected(world: &mut RequisitionWorld) -> Result<(), eyre::Report> {
    let requisition = world
        .requisition
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no requisition in scenario world"))?;
    let approver = world
        .approver
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no approver in scenario world"))?;
    run_async(world.workflow.decide(
        requisition.id(),
        RequisitionDecision::Reject,
        approver.id(),
        None,
    ))
    .map_err(|err| eyre::eyre!("reject requisition: {err}"))?;
    Ok(())
}
