//! In-memory adapters for the purchase request context.

mod repository;

pub use repository::InMemoryPurchaseRequestRepository;
