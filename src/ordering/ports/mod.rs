//! Ports for the ordering context.

pub mod repository;

pub use repository::{
    InvoiceRepository, InvoiceRepositoryError, InvoiceRepositoryResult, OrderRepository,
    OrderRepositoryError, OrderRepositoryResult,
};
