//! Adapters for inventory persistence.

pub mod memory;
pub mod postgres;
