//! Inventory bounded context.
//!
//! Catalogues stock items, records inward entries against them, and tracks
//! issue logs for stock handed out to requesters. Consumable classes are
//! written off at issue time; durable classes stay outstanding until the
//! holder returns them. Inward entries may carry a maintenance date, which
//! the periodic scanner turns into reminders when it falls due.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
