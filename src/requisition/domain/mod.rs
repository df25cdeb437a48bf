//! Requisition domain model.

mod error;
mod ids;
mod line;
mod requisition;
mod status;

pub use error::{ParseRequisitionStatusError, RequisitionDomainError};
pub use ids::{RequisitionId, RequisitionLineId};
pub use line::{LineIssue, LineReturn, RequisitionLine, RequisitionLineDraft};
pub use requisition::{
    AmendRequisitionParams, PersistedRequisitionData, Requisition, RequisitionParams,
};
pub use status::{RequisitionDecision, RequisitionStatus};
