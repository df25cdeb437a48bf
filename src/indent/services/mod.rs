//! Purchase request application services.

mod workflow;

pub use workflow::{
    PurchaseRequestWorkflow, PurchaseRequestWorkflowError, PurchaseRequestWorkflowResult,
};
