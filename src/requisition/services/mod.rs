//! Requisition application services.

mod workflow;

pub use workflow::{RequisitionWorkflow, RequisitionWorkflowError, RequisitionWorkflowResult};
