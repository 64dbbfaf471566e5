//! CLR wrappers of dependency properties.

use smol_str::SmolStr;

use super::descriptors::{WPF0003, WPF0036};
use crate::diagnostics::{Analyzer, DiagnosticDescriptor, EXPECTED_NAME, NodeContext};
use crate::parser::{AstNode, PropertyDecl, SyntaxKind};
use crate::syntax::contains_range;
use crate::wpf::{ClrProperty, DependencyObjectCall, try_get_registered_name};

pub struct ClrPropertyAnalyzer;

impl Analyzer for ClrPropertyAnalyzer {
    fn name(&self) -> &'static str {
        "ClrPropertyAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0003, &WPF0036]
    }

    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::PROPERTY_DECL]
    }

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
        let model = ctx.model();
        let Some(property) = PropertyDecl::cast(ctx.node().clone()) else {
            return;
        };
        let Some(clr) = ClrProperty::try_create(&property, model) else {
            return;
        };

        if ctx.is_enabled(&WPF0003) {
            let registered = clr
                .backing(model)
                .and_then(|backing| try_get_registered_name(backing, model));
            if let (Some(registered), Some(identifier)) = (registered, property.name_token()) {
                let name = property.name().unwrap_or_default();
                if name.as_str() != registered.as_str() {
                    ctx.report_with(
                        &WPF0003,
                        identifier.text_range(),
                        &[name.as_str(), registered.as_str()],
                        vec![(SmolStr::new(EXPECTED_NAME), registered.clone())],
                    );
                }
            }
        }

        for (keyword, call) in [("get", clr.get_call(model)), ("set", clr.set_call(model))] {
            if let Some(call) = call {
                report_side_effects(ctx, &clr, keyword, &call);
            }
        }
    }
}

/// Every statement of the accessor besides the one making the call
fn report_side_effects(
    ctx: &mut NodeContext<'_, '_>,
    clr: &ClrProperty,
    keyword: &str,
    call: &DependencyObjectCall,
) {
    let Some(body) = clr.accessor(keyword).and_then(|a| a.body()) else {
        return;
    };
    let call_range = call.invocation().syntax().text_range();
    for statement in body.statements() {
        let range = statement.syntax().text_range();
        if !contains_range(range, call_range) {
            ctx.report(&WPF0036, range, &[]);
        }
    }
}
