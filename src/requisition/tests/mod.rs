//! Requisition context tests.
