//! Services for the ordering context.

mod workflow;

pub use workflow::{ProcurementWorkflow, ProcurementWorkflowError, ProcurementWorkflowResult};
