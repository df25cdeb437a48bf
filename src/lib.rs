//! Lavoisier: laboratory inventory and procurement workflows.
//!
//! This crate tracks a teaching laboratory's stock and drives its paperwork:
//! requisitions drawing on existing inventory, indents and order requests for
//! new purchases, purchase orders and vendor invoices, and the notification
//! fan-out that keeps each role informed of every step.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, mail relay)
//!
//! # Modules
//!
//! - [`sequence`]: Generated document codes and order numbers
//! - [`directory`]: User accounts and role membership
//! - [`notification`]: Role-addressed notification fan-out and e-mail relay
//! - [`requisition`]: Stock requisitions against existing inventory
//! - [`indent`]: New indents and order requests for items to purchase
//! - [`ordering`]: Purchase orders and vendor invoices
//! - [`inventory`]: Stock catalogue, inward entries, and issue logs

pub mod directory;
pub mod indent;
pub mod inventory;
pub mod notification;
pub mod ordering;
pub mod requisition;
pub mod sequence;

#[cfg(test)]
mod test_support;
