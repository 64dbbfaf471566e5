//! Rule dispatch.
//!
//! Analyzers register interest in node kinds. The engine walks each
//! document once, hands every node to the analyzers registered for its
//! kind and collects what they report. Handlers are isolated: a panic
//! inside one is logged and treated as "no diagnostic".

use std::panic::{AssertUnwindSafe, catch_unwind};

use indexmap::IndexMap;
use parking_lot::Mutex;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::config::AnalyzerConfig;
use super::descriptor::DiagnosticDescriptor;
use super::diagnostic::Diagnostic;
use super::suppression::Suppressions;
use crate::base::{FileId, TextRange};
use crate::hir::{Compilation, SemanticModel};
use crate::parser::{SyntaxKind, SyntaxNode};

/// A rule implementation.
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Every descriptor this analyzer may report
    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor];

    /// Node kinds the analyzer is dispatched on
    fn kinds(&self) -> &'static [SyntaxKind];

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>);
}

/// Everything a handler sees for one node.
pub struct NodeContext<'m, 'a> {
    model: &'m SemanticModel<'a>,
    node: SyntaxNode,
    config: &'m AnalyzerConfig,
    token: &'m CancellationToken,
    diagnostics: Vec<Diagnostic>,
}

impl<'m, 'a> NodeContext<'m, 'a> {
    pub fn new(
        model: &'m SemanticModel<'a>,
        node: SyntaxNode,
        config: &'m AnalyzerConfig,
        token: &'m CancellationToken,
    ) -> Self {
        Self {
            model,
            node,
            config,
            token,
            diagnostics: Vec::new(),
        }
    }

    pub fn model(&self) -> &'m SemanticModel<'a> {
        self.model
    }

    pub fn node(&self) -> &SyntaxNode {
        &self.node
    }

    pub fn token(&self) -> &'m CancellationToken {
        self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_enabled(&self, descriptor: &DiagnosticDescriptor) -> bool {
        self.config.is_enabled(descriptor)
    }

    pub fn report(&mut self, descriptor: &'static DiagnosticDescriptor, range: TextRange, args: &[&str]) {
        self.report_with(descriptor, range, args, Vec::new());
    }

    /// Report with a fix payload
    pub fn report_with(
        &mut self,
        descriptor: &'static DiagnosticDescriptor,
        range: TextRange,
        args: &[&str],
        properties: Vec<(SmolStr, String)>,
    ) {
        let Some(severity) = self.config.effective_severity(descriptor) else {
            return;
        };
        self.diagnostics.push(Diagnostic {
            id: SmolStr::new(descriptor.id),
            severity,
            message: descriptor.format_message(args),
            file: self.model.file(),
            range,
            properties,
        });
    }

    fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// A handler that panicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    pub analyzer: &'static str,
    pub file: FileId,
    pub range: TextRange,
    pub message: String,
}

/// Output of one analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    /// Ordered by document, then position, then id
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<HandlerFailure>,
}

/// The analyzers with their kind-keyed dispatch table. Built once, then
/// shared read-only.
pub struct Registry {
    analyzers: Vec<Box<dyn Analyzer>>,
    by_kind: FxHashMap<SyntaxKind, Vec<usize>>,
    descriptors: IndexMap<&'static str, &'static DiagnosticDescriptor>,
}

impl Registry {
    pub fn new(analyzers: Vec<Box<dyn Analyzer>>) -> Self {
        let mut by_kind: FxHashMap<SyntaxKind, Vec<usize>> = FxHashMap::default();
        let mut descriptors = IndexMap::new();
        for (index, analyzer) in analyzers.iter().enumerate() {
            for &kind in analyzer.kinds() {
                by_kind.entry(kind).or_default().push(index);
            }
            for &descriptor in analyzer.descriptors() {
                descriptors.insert(descriptor.id, descriptor);
            }
        }
        descriptors.sort_keys();
        Self {
            analyzers,
            by_kind,
            descriptors,
        }
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &'static DiagnosticDescriptor> + '_ {
        self.descriptors.values().copied()
    }

    pub fn descriptor(&self, id: &str) -> Option<&'static DiagnosticDescriptor> {
        self.descriptors.get(id).copied()
    }

    pub fn analyzer_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.analyzers.iter().map(|a| a.name())
    }

    /// Configured rule ids no analyzer knows about
    pub fn unknown_rules(&self, config: &AnalyzerConfig) -> Vec<SmolStr> {
        config
            .rule_ids()
            .filter(|id| !self.descriptors.contains_key(id.as_str()))
            .cloned()
            .collect()
    }

    /// Analyze one document.
    pub fn analyze_document(
        &self,
        model: &SemanticModel<'_>,
        config: &AnalyzerConfig,
        token: &CancellationToken,
    ) -> AnalysisResult {
        if model.document().is_generated() {
            debug!(path = %model.document().path, "skipping generated document");
            return AnalysisResult::default();
        }
        let failures = Mutex::new(Vec::new());
        let diagnostics = self.analyze_model(model, config, token, &failures);
        if token.is_cancelled() {
            return AnalysisResult::default();
        }
        AnalysisResult {
            diagnostics,
            failures: failures.into_inner(),
        }
    }

    /// Analyze every user document, in parallel.
    pub fn analyze_compilation(
        &self,
        compilation: &Compilation,
        config: &AnalyzerConfig,
        token: &CancellationToken,
    ) -> AnalysisResult {
        for id in self.unknown_rules(config) {
            warn!(rule = %id, "configuration names an unknown rule");
        }
        let files: Vec<FileId> = compilation
            .documents()
            .filter(|d| {
                let generated = d.is_generated();
                if generated {
                    debug!(path = %d.path, "skipping generated document");
                }
                !generated
            })
            .map(|d| d.id)
            .collect();
        debug!(documents = files.len(), "analyzing compilation");
        let failures = Mutex::new(Vec::new());
        let per_file: Vec<Vec<Diagnostic>> = files
            .par_iter()
            .map(|&file| match compilation.semantic_model(file) {
                Some(model) => self.analyze_model(&model, config, token, &failures),
                None => Vec::new(),
            })
            .collect();
        if token.is_cancelled() {
            return AnalysisResult::default();
        }
        let diagnostics: Vec<Diagnostic> = per_file.into_iter().flatten().collect();
        let failures = failures.into_inner();
        debug!(
            diagnostics = diagnostics.len(),
            failures = failures.len(),
            "analysis finished"
        );
        AnalysisResult {
            diagnostics,
            failures,
        }
    }

    fn analyze_model(
        &self,
        model: &SemanticModel<'_>,
        config: &AnalyzerConfig,
        token: &CancellationToken,
        failures: &Mutex<Vec<HandlerFailure>>,
    ) -> Vec<Diagnostic> {
        let active: Vec<bool> = self
            .analyzers
            .iter()
            .map(|a| a.descriptors().iter().any(|d| config.is_enabled(d)))
            .collect();
        let mut diagnostics = Vec::new();
        for node in model.root().descendants() {
            if token.is_cancelled() {
                return Vec::new();
            }
            let Some(indices) = self.by_kind.get(&node.kind()) else {
                continue;
            };
            for &index in indices {
                if !active[index] {
                    continue;
                }
                let analyzer = &self.analyzers[index];
                trace!(analyzer = analyzer.name(), kind = ?node.kind(), "dispatch");
                let mut ctx = NodeContext::new(model, node.clone(), config, token);
                match catch_unwind(AssertUnwindSafe(|| analyzer.analyze(&mut ctx))) {
                    Ok(()) => diagnostics.extend(ctx.into_diagnostics()),
                    Err(payload) => {
                        let message = panic_message(payload.as_ref());
                        warn!(
                            analyzer = analyzer.name(),
                            file = %model.file(),
                            range = ?node.text_range(),
                            %message,
                            "analyzer panicked"
                        );
                        failures.lock().push(HandlerFailure {
                            analyzer: analyzer.name(),
                            file: model.file(),
                            range: node.text_range(),
                            message,
                        });
                    }
                }
            }
        }
        let suppressions = Suppressions::from_root(model.root());
        diagnostics.retain(|d| !suppressions.is_suppressed(&d.id, d.range.start()));
        diagnostics.sort_by(|a, b| {
            (a.range.start(), a.range.end(), &a.id).cmp(&(b.range.start(), b.range.end(), &b.id))
        });
        diagnostics.dedup();
        diagnostics
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "unknown panic".to_string()
}
