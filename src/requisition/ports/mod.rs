//! Ports for the requisition context.

pub mod repository;

pub use repository::{
    RequisitionRepository, RequisitionRepositoryError, RequisitionRepositoryResult,
};
