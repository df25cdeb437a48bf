//! Purchase request bounded context.
//!
//! A purchase request asks to buy items rather than draw them from stock.
//! It covers the two procurement request documents — new indents for items
//! the stores have never carried, and order requests for replenishing known
//! ones — as one aggregate with a kind tag. A request moves from `Pending`
//! through approval to `Ordered` and finally `Issued`, fanning out a
//! notification on each transition.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
