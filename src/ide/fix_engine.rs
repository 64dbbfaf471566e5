//! Code fix dispatch.
//!
//! A diagnostic carries a span, not a node. The engine finds the flagged
//! node again in the diagnostic's document and asks every provider
//! registered for the rule id for an action. Fix-all resolves every target
//! against the original compilation and merges the resulting edits into
//! one change; a group overlapping an already accepted one is skipped.

use rustc_hash::FxHashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::change::{CodeAction, SolutionChange};
use super::fixes;
use crate::diagnostics::Diagnostic;
use crate::hir::{Compilation, SemanticModel};
use crate::parser::SyntaxNode;
use crate::syntax::node_at_range;

/// Computes code actions for diagnostics of some rules.
pub trait CodeFixProvider: Send + Sync {
    /// Rule ids this provider fixes
    fn fixable_ids(&self) -> &'static [&'static str];

    /// `None` when the flagged code has a shape the fix does not handle
    fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction>;
}

/// The flagged node and what is known about it.
pub struct FixContext<'m, 'a> {
    model: &'m SemanticModel<'a>,
    diagnostic: &'m Diagnostic,
    node: SyntaxNode,
    token: &'m CancellationToken,
}

impl<'m, 'a> FixContext<'m, 'a> {
    pub fn model(&self) -> &'m SemanticModel<'a> {
        self.model
    }

    pub fn compilation(&self) -> &'a Compilation {
        self.model.compilation()
    }

    pub fn diagnostic(&self) -> &'m Diagnostic {
        self.diagnostic
    }

    /// Outermost node spanning exactly the diagnostic range
    pub fn node(&self) -> &SyntaxNode {
        &self.node
    }

    pub fn token(&self) -> &'m CancellationToken {
        self.token
    }
}

pub struct FixEngine {
    providers: Vec<Box<dyn CodeFixProvider>>,
    by_id: FxHashMap<&'static str, Vec<usize>>,
}

impl Default for FixEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FixEngine {
    /// Engine with every built-in provider
    pub fn new() -> Self {
        Self::with_providers(fixes::providers())
    }

    pub fn with_providers(providers: Vec<Box<dyn CodeFixProvider>>) -> Self {
        let mut by_id: FxHashMap<&'static str, Vec<usize>> = FxHashMap::default();
        for (index, provider) in providers.iter().enumerate() {
            for &id in provider.fixable_ids() {
                by_id.entry(id).or_default().push(index);
            }
        }
        Self { providers, by_id }
    }

    pub fn fixable_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_id.keys().copied()
    }

    pub fn code_actions(
        &self,
        compilation: &Compilation,
        diagnostic: &Diagnostic,
        token: &CancellationToken,
    ) -> Vec<CodeAction> {
        let Some(indices) = self.by_id.get(diagnostic.id.as_str()) else {
            return Vec::new();
        };
        let Some(model) = compilation.semantic_model(diagnostic.file) else {
            return Vec::new();
        };
        let Some(node) = node_at_range(model.root(), diagnostic.range) else {
            return Vec::new();
        };
        let ctx = FixContext {
            model: &model,
            diagnostic,
            node,
            token,
        };
        let mut actions = Vec::new();
        for &index in indices {
            if token.is_cancelled() {
                return Vec::new();
            }
            let action = self.providers[index].provide(&ctx);
            if token.is_cancelled() {
                return Vec::new();
            }
            if let Some(action) = action {
                if !action.change.is_empty() {
                    actions.push(action);
                }
            }
        }
        actions
    }

    /// Fix every diagnostic of `rule_id` in one change.
    ///
    /// The action chosen for each diagnostic is the one sharing the
    /// equivalence key of the first action found.
    pub fn fix_all(
        &self,
        compilation: &Compilation,
        rule_id: &str,
        diagnostics: &[Diagnostic],
        token: &CancellationToken,
    ) -> SolutionChange {
        let mut change = SolutionChange::new();
        let mut key = None;
        let mut fixed = 0;
        for diagnostic in diagnostics.iter().filter(|d| d.id == rule_id) {
            if token.is_cancelled() {
                return SolutionChange::new();
            }
            let actions = self.code_actions(compilation, diagnostic, token);
            let chosen = match key {
                None => actions.into_iter().next(),
                Some(key) => actions.into_iter().find(|a| a.equivalence_key == key),
            };
            let Some(action) = chosen else {
                continue;
            };
            key.get_or_insert(action.equivalence_key);
            if let Some(conflict) = change.conflict_with(&action.change) {
                warn!(
                    rule = rule_id,
                    range = ?diagnostic.range,
                    %conflict,
                    "skipping conflicting fix"
                );
                continue;
            }
            change.merge(action.change);
            fixed += 1;
        }
        if token.is_cancelled() {
            return SolutionChange::new();
        }
        debug!(rule = rule_id, fixed, "fix all");
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, TextRange};
    use crate::diagnostics::{AnalyzerConfig, EXPECTED_NAME};
    use crate::ide::TextEdit;
    use crate::parser::AstNode;
    use crate::rules::registry;

    const SOURCE: &str = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        public int Bar
        {
            get => (int)this.GetValue(BarProperty);
            set => this.SetValue(BarProperty, value);
        }

        public void A() { this.SetValue(BarProperty, 1); }

        public void B() { this.SetValue(BarProperty, 2); }
    }
}"#;

    fn diagnostics(compilation: &Compilation) -> Vec<Diagnostic> {
        registry()
            .analyze_compilation(compilation, &AnalyzerConfig::default(), &CancellationToken::new())
            .diagnostics
    }

    /// Replaces the flagged node with a fixed text
    struct Replace(&'static str);

    impl CodeFixProvider for Replace {
        fn fixable_ids(&self) -> &'static [&'static str] {
            &["WPF0041"]
        }

        fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction> {
            let mut change = SolutionChange::new();
            change.add_edits(
                ctx.diagnostic().file,
                [TextEdit::replace(ctx.node().text_range(), self.0)],
            );
            Some(CodeAction {
                title: "Replace".to_string(),
                equivalence_key: "Replace",
                change,
            })
        }
    }

    #[test]
    fn test_node_is_relocated_by_span() {
        let compilation = Compilation::from_text(SOURCE);
        let found = diagnostics(&compilation);
        let engine = FixEngine::with_providers(vec![Box::new(Replace("X()"))]);
        let actions = engine.code_actions(&compilation, &found[0], &CancellationToken::new());
        assert_eq!(actions.len(), 1);
        let (texts, _) = actions[0].change.apply(&compilation).unwrap();
        assert!(texts[&FileId::new(0)].contains("public void A() { X(); }"));
    }

    #[test]
    fn test_fix_all_merges_every_occurrence() {
        let compilation = Compilation::from_text(SOURCE);
        let found = diagnostics(&compilation);
        assert_eq!(found.len(), 2);
        let change = FixEngine::new().fix_all(&compilation, "WPF0041", &found, &CancellationToken::new());
        let (texts, updated) = change.apply(&compilation).unwrap();
        let text = &texts[&FileId::new(0)];
        assert!(text.contains("this.SetCurrentValue(BarProperty, 1)"));
        assert!(text.contains("this.SetCurrentValue(BarProperty, 2)"));
        assert!(diagnostics(&updated).is_empty());
    }

    #[test]
    fn test_unfixable_rule_has_no_actions() {
        let compilation = Compilation::from_text(SOURCE);
        let diagnostic = Diagnostic {
            id: "WPF0131".into(),
            severity: crate::diagnostics::Severity::Warning,
            message: String::new(),
            file: FileId::new(0),
            range: compilation
                .document(FileId::new(0))
                .unwrap()
                .syntax()
                .descendants()
                .find_map(crate::parser::TypeDecl::cast)
                .unwrap()
                .syntax()
                .text_range(),
            properties: vec![(EXPECTED_NAME.into(), "X".to_string())],
        };
        assert!(
            FixEngine::new()
                .code_actions(&compilation, &diagnostic, &CancellationToken::new())
                .is_empty()
        );
    }

    #[test]
    fn test_cancelled_fix_all_is_empty() {
        let compilation = Compilation::from_text(SOURCE);
        let found = diagnostics(&compilation);
        let token = CancellationToken::new();
        token.cancel();
        assert!(FixEngine::new().fix_all(&compilation, "WPF0041", &found, &token).is_empty());
    }

    /// Replaces from the flagged node through the end of its type, so two
    /// fixes in one type always overlap
    struct ThroughTypeEnd;

    impl CodeFixProvider for ThroughTypeEnd {
        fn fixable_ids(&self) -> &'static [&'static str] {
            &["WPF0041"]
        }

        fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction> {
            let ty = ctx.node().ancestors().find_map(crate::parser::TypeDecl::cast)?;
            let range = TextRange::new(ctx.node().text_range().start(), ty.syntax().text_range().end());
            let mut change = SolutionChange::new();
            change.add_edits(ctx.diagnostic().file, [TextEdit::replace(range, "X(); }\n    }")]);
            Some(CodeAction {
                title: "Truncate".to_string(),
                equivalence_key: "Truncate",
                change,
            })
        }
    }

    #[test]
    fn test_fix_all_skips_conflicting_fix() {
        let compilation = Compilation::from_text(SOURCE);
        let found = diagnostics(&compilation);
        assert_eq!(found.len(), 2);
        let engine = FixEngine::with_providers(vec![Box::new(ThroughTypeEnd)]);
        let change = engine.fix_all(&compilation, "WPF0041", &found, &CancellationToken::new());
        assert_eq!(change.edits(FileId::new(0)).len(), 1);
        let (texts, updated) = change.apply(&compilation).unwrap();
        let text = &texts[&FileId::new(0)];
        assert!(text.contains("public void A() { X(); }\n    }\n}"));
        assert!(!text.contains("public void B()"));
        assert!(updated.document(FileId::new(0)).unwrap().errors.is_empty());
    }

    /// Cancels the run while building its action
    struct CancelWhileProviding;

    impl CodeFixProvider for CancelWhileProviding {
        fn fixable_ids(&self) -> &'static [&'static str] {
            &["WPF0041"]
        }

        fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction> {
            ctx.token().cancel();
            Replace("X()").provide(ctx)
        }
    }

    #[test]
    fn test_action_built_during_cancellation_is_dropped() {
        let compilation = Compilation::from_text(SOURCE);
        let found = diagnostics(&compilation);
        let engine = FixEngine::with_providers(vec![Box::new(CancelWhileProviding)]);
        let token = CancellationToken::new();
        assert!(engine.code_actions(&compilation, &found[0], &token).is_empty());
        assert!(token.is_cancelled());
    }
}
