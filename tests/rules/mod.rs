//! Rule catalogue tests
//!
//! Tests for:
//! - Dependency property naming and registration forms
//! - Read-only dependency properties with backing fields or properties
//! - Negative controls, idempotence and cancellation
//! - `#pragma warning` suppression

pub mod tests_dependency_property;
pub mod tests_engine;
