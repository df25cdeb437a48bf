//! Stock requisition bounded context.
//!
//! A requisition asks to draw stock that is already in the inventory. It
//! moves from `Pending` through approval to `Issued`, and for equipment
//! classes on to `Returned`, with per-line issued, returned, and
//! lost-or-damaged quantities. Each transition fans out a notification to
//! the roles the workflow addresses.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
