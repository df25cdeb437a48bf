//! In-memory adapters for the requisition context.

mod repository;

pub use repository::InMemoryRequisitionRepository;
