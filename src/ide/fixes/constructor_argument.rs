//! `[ConstructorArgument]` for markup extension properties.

use crate::diagnostics::ARGUMENT_NAME;
use crate::ide::change::{CodeAction, SolutionChange};
use crate::ide::editor::DocumentEditor;
use crate::ide::fix_engine::{CodeFixProvider, FixContext};
use crate::parser::{AstNode, PropertyDecl};

pub struct ConstructorArgumentFix;

impl CodeFixProvider for ConstructorArgumentFix {
    fn fixable_ids(&self) -> &'static [&'static str] {
        &["WPF0083"]
    }

    fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction> {
        let parameter = ctx.diagnostic().property(ARGUMENT_NAME)?;
        let property = ctx.node().ancestors().find_map(PropertyDecl::cast)?;
        let mut editor = DocumentEditor::for_document(ctx.compilation(), ctx.diagnostic().file).ok()?;
        let indent = editor.indentation(property.syntax());
        editor.insert_before(
            property.syntax(),
            format!("[ConstructorArgument(\"{parameter}\")]\n{indent}"),
        );
        editor.add_using("System.Windows.Markup");
        let mut change = SolutionChange::new();
        change.add_document(editor);
        Some(CodeAction {
            title: format!("Add [ConstructorArgument(\"{parameter}\")]."),
            equivalence_key: "AddConstructorArgument",
            change,
        })
    }
}
