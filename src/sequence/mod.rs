//! Document code generation for Lavoisier.
//!
//! Every workflow document (requisition, indent, order request, purchase
//! order, inward entry) carries a human-readable code; purchase orders
//! additionally carry a financial-year order number. Both are backed by a
//! named atomic counter so concurrent document creation never yields
//! duplicate codes. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
