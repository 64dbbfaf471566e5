//! Configuration tests
//!
//! Tests for:
//! - Loading rule settings from a file
//! - Severity overrides reaching reported diagnostics

pub mod tests_config;
