//! In-memory adapters for the ordering context.

mod repository;

pub use repository::{InMemoryInvoiceRepository, InMemoryOrderRepository};
