//! Diagnostic rule engine.
//!
//! ## Key Types
//!
//! - [`DiagnosticDescriptor`] - id, title, message template, category, severity
//! - [`Analyzer`] - a rule handler dispatched by node kind
//! - [`Registry`] - the immutable kind → handlers table
//! - [`AnalyzerConfig`] - per-rule enablement and severity
//! - [`Diagnostic`] - one reported violation
//!
//! ```text
//! Registry::analyze_compilation   ← documents in parallel
//!     │
//!     ▼
//! analyzers by node kind           ← each handler isolated with catch_unwind
//!     │
//!     ▼
//! #pragma suppression, ordering    ← (file, position, id)
//! ```

mod config;
mod descriptor;
mod diagnostic;
mod engine;
mod suppression;

pub use config::{AnalyzerConfig, ConfigError, RuleSetting};
pub use descriptor::{Category, DiagnosticDescriptor, Severity, format_message, help_link};
pub use diagnostic::{ARGUMENT_NAME, Diagnostic, EXPECTED_NAME, EXPECTED_TYPE};
pub use engine::{AnalysisResult, Analyzer, HandlerFailure, NodeContext, Registry};
pub use suppression::Suppressions;
