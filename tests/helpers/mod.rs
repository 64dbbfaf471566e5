//! Shared test helpers
//!
//! - `fixtures`: WPF source snippets
//! - `analysis_helpers`: analyze, `↓` marker handling and fix application

pub mod analysis_helpers;
pub mod fixtures;
