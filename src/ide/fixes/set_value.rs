//! `SetValue` and `SetCurrentValue` swaps.

use crate::hir::{SemanticModel, SymbolKind};
use crate::ide::change::{CodeAction, SolutionChange};
use crate::ide::editor::DocumentEditor;
use crate::ide::fix_engine::{CodeFixProvider, FixContext};
use crate::parser::{
    AssignmentExpr, AstNode, Expr, InvocationExpr, MemberAccessExpr, SyntaxKind,
};
use crate::rules::{backing_reference, settable_backing};
use crate::wpf::{known, try_get_registered_type};

pub struct UseSetCurrentValueFix;

impl CodeFixProvider for UseSetCurrentValueFix {
    fn fixable_ids(&self) -> &'static [&'static str] {
        &["WPF0041"]
    }

    fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction> {
        let mut editor = DocumentEditor::for_document(ctx.compilation(), ctx.diagnostic().file).ok()?;
        let node = ctx.node();
        if let Some(invocation) = InvocationExpr::cast(node.clone()) {
            let name = invocation.method_name_token()?;
            editor.replace_token(&name, "SetCurrentValue");
        } else {
            let assignment = AssignmentExpr::cast(node.clone())?;
            let replacement = assignment_replacement(ctx.model(), &assignment)?;
            editor.replace(assignment.syntax(), replacement);
        }
        let mut change = SolutionChange::new();
        change.add_document(editor);
        Some(CodeAction {
            title: "Use SetCurrentValue".to_string(),
            equivalence_key: "UseSetCurrentValue",
            change,
        })
    }
}

/// `this.Bar = 1;` becomes `this.SetCurrentValue(BarProperty, 1);`
fn assignment_replacement(model: &SemanticModel<'_>, assignment: &AssignmentExpr) -> Option<String> {
    if assignment.syntax().parent()?.kind() != SyntaxKind::EXPR_STMT {
        return None;
    }
    let (lhs, rhs) = (assignment.lhs()?, assignment.rhs()?);
    let property = model.symbol(lhs.syntax())?;
    let symbols = model.symbols();
    if symbols.get(property).kind != SymbolKind::Property {
        return None;
    }
    let receiver = match lhs.kind() {
        SyntaxKind::MEMBER_ACCESS_EXPR => {
            let access = MemberAccessExpr::cast(lhs.syntax().clone())?;
            access.expr()?.syntax().text().to_string()
        }
        SyntaxKind::IDENTIFIER_NAME if !symbols.get(property).is_static => "this".to_string(),
        _ => return None,
    };
    let backing = settable_backing(model, property)?;
    let reference = backing_reference(model, backing, lhs.syntax());
    let value = rhs.syntax().text().to_string();
    let value = match (try_get_registered_type(backing, model), model.type_of(rhs.syntax())) {
        (Some(registered), Some(actual))
            if registered != actual && !model.is_type(&registered, known::OBJECT) =>
        {
            format!("({}){}", model.display(&registered), parenthesized(&rhs, value))
        }
        _ => value,
    };
    Some(format!("{receiver}.SetCurrentValue({reference}, {value})"))
}

fn parenthesized(expr: &Expr, text: String) -> String {
    match expr.kind() {
        SyntaxKind::LITERAL_EXPR
        | SyntaxKind::IDENTIFIER_NAME
        | SyntaxKind::MEMBER_ACCESS_EXPR
        | SyntaxKind::INVOCATION_EXPR
        | SyntaxKind::PAREN_EXPR => text,
        _ => format!("({text})"),
    }
}

pub struct UseSetValueFix;

impl CodeFixProvider for UseSetValueFix {
    fn fixable_ids(&self) -> &'static [&'static str] {
        &["WPF0043"]
    }

    fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction> {
        let invocation = InvocationExpr::cast(ctx.node().clone())?;
        let name = invocation.method_name_token()?;
        let mut editor = DocumentEditor::for_document(ctx.compilation(), ctx.diagnostic().file).ok()?;
        editor.replace_token(&name, "SetValue");
        let mut change = SolutionChange::new();
        change.add_document(editor);
        Some(CodeAction {
            title: "Use SetValue".to_string(),
            equivalence_key: "UseSetValue",
            change,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::ide::fixes::tests::fix_single;

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
            nameof(Bar), typeof(double), typeof(FooControl), new PropertyMetadata(default(double)));

        public double Bar
        {{
            get => (double)this.GetValue(BarProperty);
            set => this.SetValue(BarProperty, value);
        }}

{members}
    }}
}}"#
        )
    }

    #[rstest]
    #[case::invocation(
        "        public void M() { this.SetValue(BarProperty, 1.0); }",
        "this.SetCurrentValue(BarProperty, 1.0);"
    )]
    #[case::conditional(
        "        public static void M(FooControl c) { c?.SetValue(BarProperty, 1.0); }",
        "c?.SetCurrentValue(BarProperty, 1.0);"
    )]
    #[case::assignment(
        "        public void M() { this.Bar = 1.0; }",
        "this.SetCurrentValue(BarProperty, 1.0);"
    )]
    #[case::implicit_this(
        "        public void M() { Bar = 1.0; }",
        "this.SetCurrentValue(BarProperty, 1.0);"
    )]
    #[case::cast_int(
        "        public void M(int i) { this.Bar = i; }",
        "this.SetCurrentValue(BarProperty, (double)i);"
    )]
    #[case::cast_expression(
        "        public void M(int i) { this.Bar = i + 1; }",
        "this.SetCurrentValue(BarProperty, (double)(i + 1));"
    )]
    fn test_use_set_current_value(#[case] member: &str, #[case] expected: &str) {
        let source = control(member);
        let fixed = fix_single(&source, "WPF0041");
        assert!(fixed.contains(expected), "{fixed}");
    }

    #[test]
    fn test_generic_owner_outside_hierarchy() {
        let source = r#"
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
        let fixed = fix_single(source, "WPF0041");
        assert!(
            fixed.contains("fooControl.SetCurrentValue(FooControl<int>.ValueProperty, 1.0);"),
            "{fixed}"
        );
    }

    #[test]
    fn test_use_set_value_for_data_context() {
        let source = control("        public void M(object vm) { this.SetCurrentValue(DataContextProperty, vm); }");
        let fixed = fix_single(&source, "WPF0043");
        assert!(fixed.contains("this.SetValue(DataContextProperty, vm);"));
    }
}
