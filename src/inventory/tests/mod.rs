//! Inventory context tests.
