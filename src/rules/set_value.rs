//! `SetValue`, `SetCurrentValue` and assignments to CLR wrappers.

use super::descriptors::{WPF0014, WPF0041, WPF0043};
use crate::diagnostics::{Analyzer, DiagnosticDescriptor, NodeContext};
use crate::hir::{SemanticModel, SymbolId, SymbolKind, TypeRef};
use crate::parser::{
    AssignmentExpr, AstNode, InvocationExpr, MemberAccessExpr, MethodDecl, PropertyDecl, SyntaxKind,
    SyntaxNode,
};
use crate::wpf::{
    BackingFieldOrProperty, ClrMethod, ClrProperty, DependencyObjectCall,
    DependencyObjectCallKind, is_read_only, known, try_get_registered_type,
};

pub struct SetValueAnalyzer;

impl Analyzer for SetValueAnalyzer {
    fn name(&self) -> &'static str {
        "SetValueAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0014, &WPF0041, &WPF0043]
    }

    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::INVOCATION_EXPR, SyntaxKind::ASSIGNMENT_EXPR]
    }

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
        let node = ctx.node().clone();
        if let Some(invocation) = InvocationExpr::cast(node.clone()) {
            let Some(call) = DependencyObjectCall::try_create(&invocation, ctx.model()) else {
                return;
            };
            if call.kind().is_set() {
                check_value_type(ctx, &call);
                check_set_value(ctx, &call);
            }
        } else if let Some(assignment) = AssignmentExpr::cast(node) {
            check_assignment(ctx, &assignment);
        }
    }
}

fn check_value_type(ctx: &mut NodeContext<'_, '_>, call: &DependencyObjectCall) {
    let model = ctx.model();
    let Some(value) = call.value_argument(model).and_then(|a| a.expr()) else {
        return;
    };
    let Some(registered) = call.backing(model).and_then(|b| try_get_registered_type(b, model))
    else {
        return;
    };
    let Some(ty) = model.type_of(value.syntax()) else {
        return;
    };
    if model.is_type(&ty, known::OBJECT) || matches!(ty, TypeRef::TypeParam { .. }) {
        return;
    }
    if !model.is_assignable(&ty, &registered) {
        ctx.report(
            &WPF0014,
            value.syntax().text_range(),
            &[model.display(&registered).as_str()],
        );
    }
}

fn check_set_value(ctx: &mut NodeContext<'_, '_>, call: &DependencyObjectCall) {
    let model = ctx.model();
    let Some(backing) = call.backing(model) else {
        return;
    };
    let is_data_context = Some(backing.symbol()) == data_context_property(model);
    let range = call.invocation().syntax().text_range();
    match call.kind() {
        DependencyObjectCallKind::SetCurrentValue if is_data_context => {
            ctx.report(&WPF0043, range, &[]);
        }
        DependencyObjectCallKind::SetValue => {
            if is_data_context
                || call.is_key_overload(model)
                || is_read_only(backing, model)
                || is_initialization(call.invocation().syntax(), model)
            {
                return;
            }
            let (Some(property), Some(value)) = (
                call.property_argument(model).and_then(|a| a.expr()),
                call.value_argument(model).and_then(|a| a.expr()),
            ) else {
                return;
            };
            ctx.report(
                &WPF0041,
                range,
                &[
                    property.syntax().text().to_string().as_str(),
                    value.syntax().text().to_string().as_str(),
                ],
            );
        }
        _ => {}
    }
}

/// `control.Bar = 1` where `Bar` wraps `SetValue`
fn check_assignment(ctx: &mut NodeContext<'_, '_>, assignment: &AssignmentExpr) {
    let model = ctx.model();
    if assignment.op_kind() != Some(SyntaxKind::EQ) {
        return;
    }
    let (Some(lhs), Some(rhs)) = (assignment.lhs(), assignment.rhs()) else {
        return;
    };
    let Some(property) = model.symbol(lhs.syntax()) else {
        return;
    };
    if model.symbols().get(property).kind != SymbolKind::Property {
        return;
    }
    if is_initialization(assignment.syntax(), model) {
        return;
    }
    let Some(backing) = settable_backing(model, property) else {
        return;
    };
    let reference = backing_reference(model, backing, lhs.syntax());
    ctx.report(
        &WPF0041,
        assignment.syntax().text_range(),
        &[reference.as_str(), rhs.syntax().text().to_string().as_str()],
    );
}

/// Backing of a CLR wrapper whose setter calls `SetValue` with a writable
/// property
pub(crate) fn settable_backing(model: &SemanticModel<'_>, property: SymbolId) -> Option<BackingFieldOrProperty> {
    let [decl] = model.symbols().get(property).declarations.as_slice() else {
        return None;
    };
    let (declaring, node) = model.model_for(decl)?;
    let clr = ClrProperty::try_create(&PropertyDecl::cast(node)?, &declaring)?;
    let call = clr.set_call(&declaring)?;
    if call.kind() != DependencyObjectCallKind::SetValue || call.is_key_overload(&declaring) {
        return None;
    }
    let backing = call.backing(&declaring)?;
    if is_read_only(backing, &declaring) || Some(backing.symbol()) == data_context_property(model) {
        return None;
    }
    Some(backing)
}

/// `BarProperty` inside the owner's hierarchy, `FooControl.BarProperty` or
/// `FooControl<int>.BarProperty` elsewhere. `target` is the assigned
/// expression; a member access receiver supplies the owner's type arguments.
pub(crate) fn backing_reference(
    model: &SemanticModel<'_>,
    backing: BackingFieldOrProperty,
    target: &SyntaxNode,
) -> String {
    let symbols = model.symbols();
    let name = backing.name(symbols);
    let Some(owner) = backing.containing_type(symbols) else {
        return name.to_string();
    };
    let inside = model
        .containing_type(target)
        .is_some_and(|c| symbols.inherits_from(&symbols.self_type(c), owner));
    if inside {
        return name.to_string();
    }
    let owner_type = MemberAccessExpr::cast(target.clone())
        .and_then(|access| access.expr())
        .and_then(|receiver| model.type_of(receiver.syntax()))
        .and_then(|receiver| {
            symbols
                .base_chain(&receiver)
                .into_iter()
                .find(|t| t.def() == Some(owner))
        })
        .unwrap_or_else(|| symbols.self_type(owner));
    format!("{}.{}", model.display(&owner_type), name)
}

fn data_context_property(model: &SemanticModel<'_>) -> Option<SymbolId> {
    let symbols = model.symbols();
    let element = symbols.type_by_name(known::FRAMEWORK_ELEMENT)?;
    symbols.children_named(element, "DataContextProperty").first().copied()
}

/// Constructors, object initializers and the wrappers themselves set the
/// local value on purpose.
fn is_initialization(node: &SyntaxNode, model: &SemanticModel<'_>) -> bool {
    for ancestor in node.ancestors() {
        match ancestor.kind() {
            SyntaxKind::CONSTRUCTOR_DECL | SyntaxKind::INITIALIZER_EXPR => return true,
            SyntaxKind::PROPERTY_DECL => {
                return PropertyDecl::cast(ancestor)
                    .and_then(|p| ClrProperty::try_create(&p, model))
                    .is_some();
            }
            SyntaxKind::METHOD_DECL => {
                return MethodDecl::cast(ancestor)
                    .and_then(|m| ClrMethod::try_create(&m, model))
                    .is_some_and(|m| !m.is_getter());
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::rules::tests::{analyze, messages};

    fn control(members: &str) -> String {
        format!(
            r#"
namespace N
{{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {{
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        private static readonly DependencyPropertyKey ReadOnlyPropertyKey = DependencyProperty.RegisterReadOnly(
            nameof(ReadOnly), typeof(string), typeof(FooControl), new PropertyMetadata(null));

        public static readonly DependencyProperty ReadOnlyProperty = ReadOnlyPropertyKey.DependencyProperty;

        public FooControl()
        {{
            this.Bar = 1;
            this.SetValue(BarProperty, 2);
        }}

        public int Bar
        {{
            get => (int)this.GetValue(BarProperty);
            set => this.SetValue(BarProperty, value);
        }}

        public string ReadOnly
        {{
            get => (string)this.GetValue(ReadOnlyProperty);
            private set => this.SetValue(ReadOnlyPropertyKey, value);
        }}

{members}
    }}
}}"#
        )
    }

    #[rstest]
    #[case::set_value(
        "public void M() { this.SetValue(BarProperty, 1); }",
        "this.SetValue(BarProperty, 1)",
        "Use SetCurrentValue(BarProperty, 1)"
    )]
    #[case::implicit_this(
        "public void M() { SetValue(BarProperty, 1); }",
        "SetValue(BarProperty, 1)",
        "Use SetCurrentValue(BarProperty, 1)"
    )]
    #[case::assignment(
        "public void M() { this.Bar = 1; }",
        "this.Bar = 1",
        "Use SetCurrentValue(BarProperty, 1)"
    )]
    #[case::assignment_elsewhere(
        "public static void M(FooControl control) { control.Bar = 2; }",
        "control.Bar = 2",
        "Use SetCurrentValue(BarProperty, 2)"
    )]
    fn test_prefer_set_current_value(#[case] members: &str, #[case] span: &str, #[case] message: &str) {
        let source = control(members);
        let diagnostics = analyze(&SetValueAnalyzer, &source);
        assert_eq!(messages(&diagnostics), [message]);
        assert_eq!(&source[diagnostics[0].range], span);
    }

    #[test]
    fn test_assignment_outside_owner_hierarchy_is_qualified() {
        let source = format!(
            "{}\nnamespace M\n{{\n    public class User\n    {{\n        public void M(N.FooControl control) {{ control.Bar = 3; }}\n    }}\n}}",
            control("")
        );
        let diagnostics = analyze(&SetValueAnalyzer, &source);
        assert_eq!(messages(&diagnostics), ["Use SetCurrentValue(FooControl.BarProperty, 3)"]);
    }

    const GENERIC_CONTROL: &str = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl<T> : Control
    {
        public static readonly DependencyProperty ValueProperty = DependencyProperty.Register(
            nameof(Value), typeof(double), typeof(FooControl<T>), new PropertyMetadata(default(double)));

        public double Value
        {
            get => (double)this.GetValue(ValueProperty);
            set => this.SetValue(ValueProperty, value);
        }
    }

    public class User
    {
        public void M(FooControl<int> fooControl)
        {
            fooControl.Value = 1.0;
        }
    }
}"#;

    #[test]
    fn test_generic_owner_keeps_type_arguments() {
        let diagnostics = analyze(&SetValueAnalyzer, GENERIC_CONTROL);
        assert_eq!(
            messages(&diagnostics),
            ["Use SetCurrentValue(FooControl<int>.ValueProperty, 1.0)"]
        );
    }

    #[rstest]
    #[case::read_only("public void M() { this.ReadOnly = \"a\"; }")]
    #[case::key("public void M() { this.SetValue(ReadOnlyPropertyKey, \"a\"); }")]
    #[case::current("public void M() { this.SetCurrentValue(BarProperty, 1); }")]
    #[case::data_context("public void M() { this.SetValue(DataContextProperty, 1); }")]
    #[case::initializer("public static FooControl Create() => new FooControl { Bar = 1 };")]
    #[case::compound("public void M() { this.Bar += 1; }")]
    fn test_allowed_set_value(#[case] members: &str) {
        let source = control(members);
        assert!(analyze(&SetValueAnalyzer, &source).is_empty());
    }

    #[rstest]
    #[case::double_for_int("this.SetValue(BarProperty, 1.0);", "1.0", "SetValue must use registered type int")]
    #[case::null_for_int("this.SetCurrentValue(BarProperty, null);", "null", "SetValue must use registered type int")]
    #[case::int_for_string("this.SetValue(ReadOnlyPropertyKey, 1);", "1", "SetValue must use registered type string")]
    fn test_value_must_match_registered_type(
        #[case] statement: &str,
        #[case] span: &str,
        #[case] message: &str,
    ) {
        let source = control(&format!("public FooControl(int x) {{ {statement} }}"));
        let diagnostics = analyze(&SetValueAnalyzer, &source);
        assert_eq!(messages(&diagnostics), [message]);
        assert_eq!(&source[diagnostics[0].range], span);
    }

    #[test]
    fn test_data_context_uses_set_value() {
        let source = control("public void M(object vm) { this.SetCurrentValue(DataContextProperty, vm); }");
        let diagnostics = analyze(&SetValueAnalyzer, &source);
        assert_eq!(
            messages(&diagnostics),
            ["Use SetValue instead of SetCurrentValue for DataContext"]
        );
    }
}
