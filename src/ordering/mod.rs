//! Purchase order and invoice bounded context.
//!
//! Once an indent or order request is approved, a purchase order is placed
//! with a vendor under two generated numbers: the monthly `PO-` document
//! code and the institution order number printed on vendor paperwork.
//! Vendor invoices are then recorded against the order under a unique bill
//! number and move through their own approve, reject, or hold decision.
//! Each step fans out a notification to the administrative roles.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
