//! High-level IR (HIR): symbols, name resolution and expression types.
//!
//! ## Key Types
//!
//! - [`Compilation`] - immutable set of parsed documents plus their symbols
//! - [`SymbolTable`] - arena of namespaces, types and members
//! - [`SemanticModel`] - per-document binding and type queries
//! - [`TypeRef`] - a resolved, possibly constructed, type
//!
//! ## Layers
//!
//! ```text
//! Compilation::from_sources   ← INPUT: (path, text) pairs + framework stubs
//!     │
//!     ▼
//! build_symbol_table          ← declare, then resolve signatures
//!     │
//!     ▼
//! SemanticModel::bind/type_of ← on-demand queries per document
//! ```

mod collect;
mod compilation;
mod framework;
mod scope;
mod semantic;
mod symbols;

pub use compilation::{Compilation, Document};
pub use scope::{NamespaceOrType, Scope};
pub use semantic::{Binding, Local, LocalKind, SemanticModel};
pub use symbols::{
    Accessibility, ParamInfo, Symbol, SymbolDecl, SymbolId, SymbolKind, SymbolTable, TypeKind,
    TypeRef, predefined_type,
};
