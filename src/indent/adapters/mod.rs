//! Persistence adapters for the purchase request context.

pub mod memory;
pub mod postgres;
