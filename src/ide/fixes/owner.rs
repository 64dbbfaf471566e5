//! Use the containing type as registration owner.

use crate::ide::change::{CodeAction, SolutionChange};
use crate::ide::editor::DocumentEditor;
use crate::ide::fix_engine::{CodeFixProvider, FixContext};
use crate::parser::{Argument, AstNode};

pub struct OwnerTypeFix;

impl CodeFixProvider for OwnerTypeFix {
    fn fixable_ids(&self) -> &'static [&'static str] {
        &["WPF0011"]
    }

    fn provide(&self, ctx: &FixContext<'_, '_>) -> Option<CodeAction> {
        let model = ctx.model();
        let argument = ctx.node().ancestors().find_map(Argument::cast)?;
        let expr = argument.expr()?;
        let containing = model.containing_type(argument.syntax())?;
        let owner = model.display(&model.symbols().self_type(containing));
        let mut editor = DocumentEditor::for_document(ctx.compilation(), ctx.diagnostic().file).ok()?;
        editor.replace(expr.syntax(), format!("typeof({owner})"));
        let mut change = SolutionChange::new();
        change.add_document(editor);
        Some(CodeAction {
            title: format!("Use containing type: {owner}."),
            equivalence_key: "UseContainingType",
            change,
        })
    }
}
