//! Methods passed as property changed, coerce and validate callbacks.

use smol_str::SmolStr;

use super::descriptors::{WPF0005, WPF0006, WPF0007, WPF0023};
use crate::diagnostics::{Analyzer, DiagnosticDescriptor, EXPECTED_NAME, NodeContext};
use crate::hir::{SemanticModel, SymbolId};
use crate::parser::{
    AstNode, Expr, InvocationExpr, MethodDecl, ObjectCreationExpr, SyntaxKind,
};
use crate::syntax::try_single_statement;
use crate::wpf::{
    Callback, CallbackKind, PropertyMetadataCall, RegistrationCall, find_references,
    try_single_method_declaration,
};

pub struct CallbackAnalyzer;

impl Analyzer for CallbackAnalyzer {
    fn name(&self) -> &'static str {
        "CallbackAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0005, &WPF0006, &WPF0007, &WPF0023]
    }

    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::OBJECT_CREATION_EXPR, SyntaxKind::INVOCATION_EXPR]
    }

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
        let model = ctx.model();
        let node = ctx.node().clone();
        if let Some(creation) = ObjectCreationExpr::cast(node.clone()) {
            let Some(metadata) = PropertyMetadataCall::try_create(&creation, model) else {
                return;
            };
            let Some(call) = metadata.registration(model) else {
                return;
            };
            let registered = call.property_name(model);
            for kind in [CallbackKind::PropertyChanged, CallbackKind::CoerceValue] {
                let callback = metadata
                    .callback_argument(kind, model)
                    .and_then(|a| Callback::try_create(&a, model));
                if let Some(callback) = callback {
                    check_callback(ctx, kind, &callback, registered.as_deref());
                }
            }
        } else if let Some(invocation) = InvocationExpr::cast(node) {
            let Some(call) = RegistrationCall::try_create(&invocation, model) else {
                return;
            };
            let callback = call
                .validate_value_callback(model)
                .and_then(|a| Callback::try_create(&a, model));
            if let Some(callback) = callback {
                let registered = call.registered_name(model);
                check_callback(ctx, CallbackKind::ValidateValue, &callback, registered.as_deref());
            }
        }
    }
}

fn descriptor(kind: CallbackKind) -> &'static DiagnosticDescriptor {
    match kind {
        CallbackKind::PropertyChanged => &WPF0005,
        CallbackKind::CoerceValue => &WPF0006,
        CallbackKind::ValidateValue => &WPF0007,
    }
}

fn check_callback(
    ctx: &mut NodeContext<'_, '_>,
    kind: CallbackKind,
    callback: &Callback,
    registered: Option<&str>,
) {
    let model = ctx.model();
    let argument_range = callback.argument().syntax().text_range();
    let Some((declaring_model, declaration)) = try_single_method_declaration(model, callback.method())
    else {
        return;
    };

    if is_trivial(&declaration) {
        ctx.report(&WPF0023, argument_range, &[]);
    }

    let Some(registered) = registered else {
        return;
    };
    let name = &model.symbols().get(callback.method()).name;
    let expected = kind.expected_name(registered);
    if name.as_str() == expected || !is_single_usage(&declaring_model, callback.method(), ctx) {
        return;
    }
    ctx.report_with(
        descriptor(kind),
        argument_range,
        &[name.as_str(), expected.as_str()],
        vec![(SmolStr::new(EXPECTED_NAME), expected.clone())],
    );
}

/// A method shared between several registrations keeps its name
fn is_single_usage(model: &SemanticModel<'_>, method: SymbolId, ctx: &NodeContext<'_, '_>) -> bool {
    find_references(model.compilation(), method, ctx.token()).len() == 1
}

/// One parameter and a body that is a single expression
pub(crate) fn is_trivial(declaration: &MethodDecl) -> bool {
    declaration.parameters().len() == 1 && trivial_body(declaration).is_some()
}

/// `=> expr` or `{ return expr; }`
pub(crate) fn trivial_body(declaration: &MethodDecl) -> Option<Expr> {
    if let Some(body) = declaration.expression_body() {
        return Some(body);
    }
    let statement = try_single_statement(&declaration.body()?)?;
    if statement.kind() != SyntaxKind::RETURN_STMT {
        return None;
    }
    statement.expr()
}
