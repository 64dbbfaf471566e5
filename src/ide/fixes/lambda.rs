//! Inline a trivial callback as a lambda.

use crate::hir::Accessibility;
use crate::ide::change::{CodeAction, SolutionChange};
use crate::ide::editor::DocumentEditor;
use crate::ide::fix_engine::{CodeFixProvider, FixContext};
use crate::parser::{Argument, AstNode};
use crate::rules::trivial_body;
use crate::wpf::{Callback, try_single_method_declaration, try_single_usage};

pub struct ConvertToLambdaFix;

impl CodeFixProvider for ConvertToLambdaFix {
    fn fixable_ids(&self) -> &'static [&'static str] {
        &["WPF0023"]
    }

    fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction> {
        let model = ctx.model();
        let argument = ctx.node().ancestors().find_map(Argument::cast)?;
        let callback = Callback::try_create(&argument, model)?;
        let (declaring, method) = try_single_method_declaration(model, callback.method())?;
        if declaring.file() != model.file()
            || declaring.containing_type(method.syntax()) != model.containing_type(argument.syntax())
        {
            return None;
        }
        let [parameter] = <[_; 1]>::try_from(method.parameters()).ok()?;
        let parameter = parameter.name()?;
        let body = trivial_body(&method)?;

        let mut editor = DocumentEditor::for_document(ctx.compilation(), ctx.diagnostic().file).ok()?;
        editor.replace(argument.expr()?.syntax(), format!("{parameter} => {}", body.syntax().text()));
        let symbol = model.symbols().get(callback.method());
        if symbol.accessibility == Accessibility::Private
            && try_single_usage(ctx.compilation(), callback.method(), ctx.token()).is_some()
        {
            editor.remove(method.syntax());
        }
        let mut change = SolutionChange::new();
        change.add_document(editor);
        Some(CodeAction {
            title: "Convert to lambda".to_string(),
            equivalence_key: "ConvertToLambda",
            change,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ide::fixes::tests::fix_single;

    const CONTROL: &str = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int)), ValidateBar);

        public int Bar
        {
            get => (int)this.GetValue(BarProperty);
            set => this.SetValue(BarProperty, value);
        }

        {access} static bool ValidateBar(object value) => value is int i && i >= 0;
    }
}"#;

    #[test]
    fn test_private_callback_is_inlined_and_removed() {
        let fixed = fix_single(&CONTROL.replace("{access}", "private"), "WPF0023");
        assert!(fixed.contains(
            "new PropertyMetadata(default(int)), value => value is int i && i >= 0);"
        ));
        assert!(!fixed.contains("ValidateBar"));
        assert!(fixed.contains("            set => this.SetValue(BarProperty, value);\n        }\n    }\n}"));
    }

    #[test]
    fn test_public_callback_is_kept() {
        let fixed = fix_single(&CONTROL.replace("{access}", "public"), "WPF0023");
        assert!(fixed.contains("value => value is int i && i >= 0);"));
        assert!(fixed.contains("public static bool ValidateBar(object value)"));
    }

    #[test]
    fn test_removed_callback_takes_its_doc_comment() {
        let source = CONTROL.replace(
            "        {access} static",
            "        /// <summary>Validates.</summary>\n        // non-negative\n        private static",
        );
        let fixed = fix_single(&source, "WPF0023");
        assert!(!fixed.contains("Validates."), "{fixed}");
        assert!(!fixed.contains("non-negative"), "{fixed}");
        assert!(fixed.contains("            set => this.SetValue(BarProperty, value);\n        }\n    }\n}"));
    }
}
