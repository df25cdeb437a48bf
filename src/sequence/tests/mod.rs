//! Unit tests for document code generation.
