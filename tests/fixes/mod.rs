//! Code fix tests
//!
//! Tests for:
//! - Single fixes applied at a marked diagnostic
//! - Fix-all over every occurrence of a rule
//! - Renames that reach into other documents

pub mod tests_code_fixes;
