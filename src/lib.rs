//! # wpf-analyzers
//!
//! Static analysis and code fixes for WPF conventions in C# sources:
//! dependency properties, routed events, value converters and markup
//! extensions.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide         → Fix engine, document editor, code fixes
//!   ↓
//! rules       → The WPF rule catalogue
//!   ↓
//! diagnostics → Descriptors, configuration, dispatch engine
//!   ↓
//! wpf         → Registration, CLR wrapper and callback recognizers
//!   ↓
//! syntax      → Attribute and argument queries over the CST
//!   ↓
//! hir         → Compilation, symbol table, semantic model
//!   ↓
//! parser      → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base        → Primitives (FileId, TextRange, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir → syntax → wpf → diagnostics → rules → ide)
// ============================================================================

/// Foundation types: FileId, TextRange, LineIndex
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Semantic model over a set of documents plus framework stubs
pub mod hir;

/// Syntax queries: attributes, arguments, name-valued expressions
pub mod syntax;

/// WPF domain recognizers
pub mod wpf;

/// Diagnostic descriptors, configuration and the rule engine
pub mod diagnostics;

/// Rule catalogue
pub mod rules;

/// Code fixes and the editing layer
pub mod ide;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};

// Re-export the main entry points
pub use diagnostics::{AnalysisResult, AnalyzerConfig, Diagnostic, DiagnosticDescriptor, Severity};
pub use hir::Compilation;
pub use ide::{CodeAction, FixEngine, SolutionChange};
pub use rules::registry;
