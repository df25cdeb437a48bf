//! Notification bounded context.
//!
//! Every workflow event produces one persistent notification record
//! addressed to a set of roles, then fans out as best-effort e-mail to the
//! addresses currently holding those roles. Records double as the in-app
//! feed and expire after a per-record TTL. Publishing the same title and
//! kind twice on one UTC day is suppressed, which keeps the hourly
//! maintenance scan from flooding the feed.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
