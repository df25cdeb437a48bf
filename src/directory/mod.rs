//! Departmental user directory for Lavoisier.
//!
//! Maps roles to the accounts currently holding them so that role-addressed
//! notifications can be resolved to concrete e-mail recipients. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
