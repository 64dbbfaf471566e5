//! Value converter fixes: default instance and `[ValueConversion]`.

use crate::diagnostics::EXPECTED_TYPE;
use crate::ide::change::{CodeAction, SolutionChange};
use crate::ide::editor::DocumentEditor;
use crate::ide::fix_engine::{CodeFixProvider, FixContext};
use crate::parser::{AstNode, SyntaxKind, TypeDecl};
use crate::rules::infer_conversion_types;

fn class_at(ctx: &FixContext<'_, '_>) -> Option<TypeDecl> {
    ctx.node().ancestors().find_map(TypeDecl::cast)
}

fn action(title: &str, key: &'static str, editor: DocumentEditor) -> CodeAction {
    let mut change = SolutionChange::new();
    change.add_document(editor);
    CodeAction {
        title: title.to_string(),
        equivalence_key: key,
        change,
    }
}

pub struct DefaultFieldFix;

impl CodeFixProvider for DefaultFieldFix {
    fn fixable_ids(&self) -> &'static [&'static str] {
        &["WPF0070"]
    }

    fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction> {
        let class = class_at(ctx)?;
        let name = class.name()?;
        let first = class.members().next()?;
        let mut editor = DocumentEditor::for_document(ctx.compilation(), ctx.diagnostic().file).ok()?;
        let indent = editor.indentation(&first);
        editor.insert_before_member(
            &first,
            format!("public static readonly {name} Default = new {name}();\n\n{indent}"),
        );
        Some(action("Add default field.", "AddDefaultField", editor))
    }
}

pub struct ValueConversionFix;

impl CodeFixProvider for ValueConversionFix {
    fn fixable_ids(&self) -> &'static [&'static str] {
        &["WPF0071"]
    }

    fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction> {
        let model = ctx.model();
        let class = class_at(ctx)?;
        let (source, target) = infer_conversion_types(&class, model)?;
        let mut editor = DocumentEditor::for_document(ctx.compilation(), ctx.diagnostic().file).ok()?;
        let indent = editor.indentation(class.syntax());
        editor.insert_before(
            class.syntax(),
            format!(
                "[ValueConversion(typeof({}), typeof({}))]\n{indent}",
                model.display(&source),
                model.display(&target)
            ),
        );
        editor.add_using("System.Windows.Data");
        Some(action("Add ValueConversion attribute.", "AddValueConversion", editor))
    }
}

pub struct ConversionTypeFix;

impl CodeFixProvider for ConversionTypeFix {
    fn fixable_ids(&self) -> &'static [&'static str] {
        &["WPF0072"]
    }

    fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction> {
        let expected = ctx.diagnostic().property(EXPECTED_TYPE)?;
        let type_of = ctx
            .node()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::TYPEOF_EXPR)?;
        let mut editor = DocumentEditor::for_document(ctx.compilation(), ctx.diagnostic().file).ok()?;
        editor.replace(&type_of, format!("typeof({expected})"));
        Some(action(
            &format!("Change to typeof({expected})."),
            "ChangeConversionType",
            editor,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::ide::fixes::tests::fix_single;

    const CONVERTER: &str = r#"
namespace N
{
    using System;
    using System.Globalization;
    using System.Windows;

    {attribute}public class BoolToVisibilityConverter : IValueConverter
    {
        public static readonly BoolToVisibilityConverter Default = new BoolToVisibilityConverter();

        public object Convert(object value, Type targetType, object parameter, CultureInfo culture)
        {
            if (value is bool b && b)
            {
                return Visibility.Visible;
            }

            return Visibility.Collapsed;
        }

        public object ConvertBack(object value, Type targetType, object parameter, CultureInfo culture)
        {
            throw new NotSupportedException();
        }
    }
}"#;

    fn with_data_using(source: &str) -> String {
        source.replace(
            "    using System.Windows;\n",
            "    using System.Windows;\n    using System.Windows.Data;\n",
        )
    }

    #[test]
    fn test_add_value_conversion_and_using() {
        let source = CONVERTER.replace("{attribute}", "");
        let fixed = fix_single(&source, "WPF0071");
        assert!(fixed.contains("    using System.Windows;\n    using System.Windows.Data;\n"));
        assert!(fixed.contains(
            "    [ValueConversion(typeof(bool), typeof(Visibility))]\n    public class BoolToVisibilityConverter"
        ));
    }

    #[test]
    fn test_correct_conversion_type() {
        let source = with_data_using(
            &CONVERTER.replace("{attribute}", "[ValueConversion(typeof(int), typeof(Visibility))]\n    "),
        );
        let fixed = fix_single(&source, "WPF0072");
        assert!(fixed.contains("[ValueConversion(typeof(bool), typeof(Visibility))]"));
    }

    #[test]
    fn test_add_default_field() {
        let source = with_data_using(&CONVERTER)
            .replace("{attribute}", "[ValueConversion(typeof(bool), typeof(Visibility))]\n    ")
            .replace(
                "        public static readonly BoolToVisibilityConverter Default = new BoolToVisibilityConverter();\n\n",
                "",
            );
        let fixed = fix_single(&source, "WPF0070");
        assert!(fixed.contains(
            "    {\n        public static readonly BoolToVisibilityConverter Default = new BoolToVisibilityConverter();\n\n        public object Convert("
        ));
    }

    #[test]
    fn test_default_field_goes_above_documented_member() {
        let source = with_data_using(&CONVERTER)
            .replace("{attribute}", "[ValueConversion(typeof(bool), typeof(Visibility))]\n    ")
            .replace(
                "        public static readonly BoolToVisibilityConverter Default = new BoolToVisibilityConverter();\n\n",
                "",
            )
            .replace(
                "        public object Convert(",
                "        /// <summary>Converts a bool.</summary>\n        public object Convert(",
            );
        let fixed = fix_single(&source, "WPF0070");
        assert!(fixed.contains(
            "    {\n        public static readonly BoolToVisibilityConverter Default = new BoolToVisibilityConverter();\n\n        /// <summary>Converts a bool.</summary>\n        public object Convert("
        ), "{fixed}");
    }
}
