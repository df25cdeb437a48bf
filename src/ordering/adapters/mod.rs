//! Persistence adapters for the ordering context.

pub mod memory;
pub mod postgres;
