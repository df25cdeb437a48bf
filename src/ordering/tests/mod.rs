//! Ordering context tests.
