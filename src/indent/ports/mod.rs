//! Ports for the purchase request context.

mod repository;

pub use repository::{
    PurchaseRequestRepository, PurchaseRequestRepositoryError, PurchaseRequestRepositoryResult,
};
