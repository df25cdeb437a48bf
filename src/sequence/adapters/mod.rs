//! Adapter implementations for document code generation.

pub mod memory;
pub mod postgres;
