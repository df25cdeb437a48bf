//! Application services for document code generation.

mod generator;

pub use generator::CodeGenerator;
