//! CLR events wrapping routed events with `AddHandler` / `RemoveHandler`.

use smol_str::SmolStr;

use super::descriptors::{WPF0102, WPF0103, WPF0104, WPF0105};
use crate::diagnostics::{Analyzer, DiagnosticDescriptor, EXPECTED_NAME, NodeContext};
use crate::hir::SemanticModel;
use crate::parser::{AccessorDecl, AstNode, EventDecl, InvocationExpr, SyntaxKind};
use crate::wpf::{BackingFieldOrProperty, known, try_get_registration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandlerMethod {
    Add,
    Remove,
}

/// `AddHandler(BarEvent, value)` or `RemoveHandler(BarEvent, value)`
struct HandlerCall {
    method: HandlerMethod,
    invocation: InvocationExpr,
    event: Option<BackingFieldOrProperty>,
}

impl HandlerCall {
    fn try_create(invocation: InvocationExpr, model: &SemanticModel<'_>) -> Option<Self> {
        let method = match invocation.method_name()?.as_str() {
            "AddHandler" => HandlerMethod::Add,
            "RemoveHandler" => HandlerMethod::Remove,
            _ => return None,
        };
        let symbols = model.symbols();
        let symbol = model.symbol(invocation.syntax())?;
        if symbols.containing_type(symbol) != symbols.type_by_name(known::UI_ELEMENT) {
            return None;
        }
        let event = invocation
            .arguments()
            .first()
            .and_then(|a| a.expr())
            .and_then(|e| model.symbol(e.syntax()))
            .and_then(|s| BackingFieldOrProperty::try_create_for_routed_event(symbols, s));
        Some(Self {
            method,
            invocation,
            event,
        })
    }
}

fn handler_calls(accessor: Option<AccessorDecl>, model: &SemanticModel<'_>) -> Vec<HandlerCall> {
    let Some(accessor) = accessor else {
        return Vec::new();
    };
    accessor
        .syntax()
        .descendants()
        .filter_map(InvocationExpr::cast)
        .filter_map(|i| HandlerCall::try_create(i, model))
        .collect()
}

pub struct RoutedEventAnalyzer;

impl Analyzer for RoutedEventAnalyzer {
    fn name(&self) -> &'static str {
        "RoutedEventAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0102, &WPF0103, &WPF0104, &WPF0105]
    }

    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::EVENT_DECL]
    }

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
        let model = ctx.model();
        let Some(event) = EventDecl::cast(ctx.node().clone()) else {
            return;
        };
        let add = handler_calls(event.accessor("add"), model);
        let remove = handler_calls(event.accessor("remove"), model);
        if add.is_empty() && remove.is_empty() {
            return;
        }

        for call in add.iter().filter(|c| c.method == HandlerMethod::Remove) {
            ctx.report(&WPF0104, call.invocation.syntax().text_range(), &[]);
        }
        for call in remove.iter().filter(|c| c.method == HandlerMethod::Add) {
            ctx.report(&WPF0105, call.invocation.syntax().text_range(), &[]);
        }

        let (Some(identifier), Some(name)) = (event.name_token(), event.name()) else {
            return;
        };
        let symbols = model.symbols();
        let add_event = add.iter().find_map(|c| c.event);
        let remove_event = remove.iter().find_map(|c| c.event);
        if let (Some(added), Some(removed)) = (add_event, remove_event) {
            if added != removed {
                ctx.report(
                    &WPF0103,
                    identifier.text_range(),
                    &[added.name(symbols).as_str(), removed.name(symbols).as_str()],
                );
            }
        }

        let Some((registration_model, call)) = add_event.and_then(|e| try_get_registration(e, model))
        else {
            return;
        };
        let Some(registered) = call.registered_name(&registration_model) else {
            return;
        };
        if name.as_str() != registered {
            ctx.report_with(
                &WPF0102,
                identifier.text_range(),
                &[name.as_str(), registered.as_str()],
                vec![(SmolStr::new(EXPECTED_NAME), registered.clone())],
            );
        }
    }
}
