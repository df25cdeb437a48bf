//! Shared test doubles for in-crate unit tests.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// Clock pinned to a fixed instant, for deterministic date-window tests.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
