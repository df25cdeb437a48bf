//! Purchase request context tests.
