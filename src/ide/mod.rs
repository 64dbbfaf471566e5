//! Code fixes and the editing layer they are built on.
//!
//! - [`DocumentEditor`] records node-keyed edits for one document
//! - [`SolutionChange`] groups edits across documents and applies them
//! - [`FixEngine`] maps diagnostics to [`CodeAction`]s and merges fix-all
//!   batches
//!
//! ## Usage
//!
//! ```ignore
//! use wpf_analyzers::ide::FixEngine;
//!
//! let engine = FixEngine::new();
//! let actions = engine.code_actions(&compilation, &diagnostic, &token);
//! let (texts, fixed) = actions[0].change.apply(&compilation)?;
//! ```

mod change;
mod editor;
mod fix_engine;
pub mod fixes;

pub use change::{CodeAction, SolutionChange};
pub use editor::{DocumentEditor, EditError, TextEdit};
pub use fix_engine::{CodeFixProvider, FixContext, FixEngine};
