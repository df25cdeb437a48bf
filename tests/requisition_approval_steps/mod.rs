//! Step definitions for the requisition approval behaviour tests.

mod given;
mod then;
mod when;
pub mod world;
