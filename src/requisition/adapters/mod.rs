//! Persistence adapters for the requisition context.

pub mod memory;
pub mod postgres;
