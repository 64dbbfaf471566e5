//! Rename a member to the name its registration expects.

use crate::diagnostics::EXPECTED_NAME;
use crate::hir::{Accessibility, SemanticModel, SymbolId};
use crate::ide::change::{CodeAction, SolutionChange};
use crate::ide::editor::TextEdit;
use crate::ide::fix_engine::{CodeFixProvider, FixContext};
use crate::parser::ast::name_token;
use crate::parser::{Argument, AstNode};
use crate::wpf::{Callback, find_references, try_single_method_declaration};

pub struct RenameFix;

impl CodeFixProvider for RenameFix {
    fn fixable_ids(&self) -> &'static [&'static str] {
        &[
            "WPF0001", "WPF0002", "WPF0003", "WPF0004", "WPF0005", "WPF0006", "WPF0007", "WPF0100",
        ]
    }

    fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction> {
        let new_name = ctx.diagnostic().property(EXPECTED_NAME)?;
        let model = ctx.model();
        let symbol = match ctx.diagnostic().id.as_str() {
            "WPF0005" | "WPF0006" | "WPF0007" => callback_method(ctx)?,
            _ => ctx
                .node()
                .ancestors()
                .find_map(|n| model.declared_symbol(&n))?,
        };
        let change = rename(model, symbol, new_name, ctx)?;
        Some(CodeAction {
            title: format!("Rename to: '{new_name}'."),
            equivalence_key: "Rename",
            change,
        })
    }
}

/// A private method declared once, passed as callback
fn callback_method(ctx: &FixContext<'_, '_>) -> Option<SymbolId> {
    let model = ctx.model();
    let argument = ctx.node().ancestors().find_map(Argument::cast)?;
    let method = Callback::try_create(&argument, model)?.method();
    try_single_method_declaration(model, method)?;
    (model.symbols().get(method).accessibility == Accessibility::Private).then_some(method)
}

fn rename(
    model: &SemanticModel<'_>,
    symbol: SymbolId,
    new_name: &str,
    ctx: &FixContext<'_, '_>,
) -> Option<SolutionChange> {
    let symbols = model.symbols();
    let declared = symbols.get(symbol);
    if declared.is_metadata || declared.name == new_name {
        return None;
    }
    let container = declared.container?;
    if !symbols.children_named(container, new_name).is_empty() {
        return None;
    }

    let mut change = SolutionChange::new();
    for decl in &declared.declarations {
        let (_, node) = model.model_for(decl)?;
        let token = name_token(&node)?;
        change.add_edits(decl.file, [TextEdit::replace(token.text_range(), new_name)]);
    }
    let references = find_references(ctx.compilation(), symbol, ctx.token());
    if ctx.token().is_cancelled() {
        return None;
    }
    for reference in references {
        let token = name_token(&reference.node)?;
        change.add_edits(reference.file, [TextEdit::replace(token.text_range(), new_name)]);
    }
    Some(change)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::ide::fixes::tests::fix_single;

    const FIELD: &str = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {
        public static readonly DependencyProperty Error = DependencyProperty.Register(
            nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        public int Bar
        {
            get => (int)this.GetValue(Error);
            set => this.SetValue(Error, value);
        }
    }
}"#;

    #[test]
    fn test_rename_backing_field_and_references() {
        let fixed = fix_single(FIELD, "WPF0001");
        assert!(fixed.contains("public static readonly DependencyProperty BarProperty = "));
        assert!(fixed.contains("(int)this.GetValue(BarProperty)"));
        assert!(fixed.contains("this.SetValue(BarProperty, value)"));
        assert!(!fixed.contains("Error"));
    }

    const CALLBACK: &str = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int), {callback}));

        public int Bar
        {
            get => (int)this.GetValue(BarProperty);
            set => this.SetValue(BarProperty, value);
        }

        {access} static void WrongName(DependencyObject d, DependencyPropertyChangedEventArgs e)
        {
            ((FooControl)d).InvalidateVisual();
        }
    }
}"#;

    #[rstest]
    #[case::method_group("WrongName")]
    #[case::delegate_creation("new PropertyChangedCallback(WrongName)")]
    fn test_rename_private_callback(#[case] callback: &str) {
        let source = CALLBACK
            .replace("{callback}", callback)
            .replace("{access}", "private");
        let fixed = fix_single(&source, "WPF0005");
        assert!(fixed.contains("private static void OnBarChanged(DependencyObject d"));
        assert!(!fixed.contains("WrongName"));
    }

    #[test]
    fn test_public_callback_is_not_renamed() {
        let source = CALLBACK
            .replace("{callback}", "WrongName")
            .replace("{access}", "public");
        let compilation = crate::hir::Compilation::from_text(&source);
        let actions = crate::ide::fixes::tests::actions(&compilation, "WPF0005");
        assert!(actions.is_empty());
    }
}
