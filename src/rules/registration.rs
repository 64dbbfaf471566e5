//! Owner types passed to `Register*`, `AddOwner` and `OverrideMetadata`.

use super::descriptors::{WPF0011, WPF0015};
use crate::diagnostics::{Analyzer, DiagnosticDescriptor, NodeContext};
use crate::parser::{AstNode, InvocationExpr, SyntaxKind};
use crate::wpf::{RegistrationCall, RegistrationKind, known};

pub struct RegistrationAnalyzer;

impl Analyzer for RegistrationAnalyzer {
    fn name(&self) -> &'static str {
        "RegistrationAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0011, &WPF0015]
    }

    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::INVOCATION_EXPR]
    }

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
        let model = ctx.model();
        let Some(invocation) = InvocationExpr::cast(ctx.node().clone()) else {
            return;
        };
        let Some(call) = RegistrationCall::try_create(&invocation, model) else {
            return;
        };
        if call.kind() == RegistrationKind::RegisterRoutedEvent {
            return;
        }
        let (Some(argument), Some(owner)) = (call.owner_argument(model), call.owner_type(model)) else {
            return;
        };
        // Open type parameters carry no owner information
        if owner.def().is_none() {
            return;
        }
        let symbols = model.symbols();

        if let Some(containing) = model.containing_type(invocation.syntax()) {
            if owner.def() != Some(containing) {
                let expected = symbols.self_type(containing);
                ctx.report(
                    &WPF0011,
                    argument.syntax().text_range(),
                    &[model.display(&expected).as_str()],
                );
            }
        }

        if call.kind().is_attached() || model.inherits_from(&owner, known::DEPENDENCY_OBJECT) {
            return;
        }
        let message = match call.kind() {
            RegistrationKind::Register | RegistrationKind::RegisterReadOnly => {
                "Maybe you intended to use 'RegisterAttached'?"
            }
            _ => "Registered owner type must inherit DependencyObject.",
        };
        ctx.report(&WPF0015, argument.syntax().text_range(), &[message]);
    }
}
