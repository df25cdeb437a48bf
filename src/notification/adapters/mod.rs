//! Adapter implementations for notification persistence and dispatch.

pub mod http;
pub mod memory;
pub mod postgres;
