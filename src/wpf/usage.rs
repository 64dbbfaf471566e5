//! Single declaration and single usage queries.

use tokio_util::sync::CancellationToken;

use crate::base::FileId;
use crate::hir::{Compilation, SemanticModel, SymbolId, SymbolKind};
use crate::parser::ast::name_token;
use crate::parser::{AstNode, MethodDecl, SyntaxKind, SyntaxNode, ident_text};
use crate::syntax::try_single;

/// A name in a user document that binds to a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub file: FileId,
    /// `IdentifierName` or `GenericName` node
    pub node: SyntaxNode,
}

/// Every name in user documents binding to `symbol`, in document order.
/// Declarations are not references.
pub fn find_references(
    compilation: &Compilation,
    symbol: SymbolId,
    token: &CancellationToken,
) -> Vec<Reference> {
    let name = &compilation.symbols().get(symbol).name;
    let mut found = Vec::new();
    for document in compilation.documents() {
        if token.is_cancelled() {
            return Vec::new();
        }
        if !document.text.contains(name.as_str()) {
            continue;
        }
        let Some(model) = compilation.semantic_model(document.id) else {
            continue;
        };
        for node in model.root().descendants() {
            if !matches!(node.kind(), SyntaxKind::IDENTIFIER_NAME | SyntaxKind::GENERIC_NAME) {
                continue;
            }
            if !name_token(&node).is_some_and(|t| ident_text(&t) == *name) {
                continue;
            }
            if model.symbol(&node) == Some(symbol) {
                found.push(Reference {
                    file: document.id,
                    node,
                });
            }
        }
    }
    found
}

/// The only reference to `symbol`; `None` when unused or used several times.
pub fn try_single_usage(
    compilation: &Compilation,
    symbol: SymbolId,
    token: &CancellationToken,
) -> Option<Reference> {
    try_single(find_references(compilation, symbol, token), |_| true)
}

/// The declaration of a source method declared exactly once, with a model
/// for its document.
pub fn try_single_method_declaration<'a>(
    model: &SemanticModel<'a>,
    method: SymbolId,
) -> Option<(SemanticModel<'a>, MethodDecl)> {
    let symbol = model.symbols().get(method);
    if symbol.kind != SymbolKind::Method || symbol.is_metadata {
        return None;
    }
    let [decl] = symbol.declarations.as_slice() else {
        return None;
    };
    let (model, node) = model.model_for(decl)?;
    Some((model, MethodDecl::cast(node)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::SymbolTable;

    const FOO: &str = r#"
namespace N
{
    public class Foo
    {
        public static int Once(int x) => x;

        public static int Twice(int x) => x;

        public static int Unused(int x) => x;

        public int M() => Once(1) + Twice(2);
    }
}"#;

    const BAR: &str = r#"
namespace N
{
    public class Bar
    {
        public int M() => Foo.Twice(3);
    }
}"#;

    fn method(symbols: &SymbolTable, name: &str) -> SymbolId {
        let foo = symbols.type_by_name("N.Foo").unwrap();
        symbols.children_named(foo, name)[0]
    }

    #[test]
    fn test_single_usage_across_documents() {
        let compilation = Compilation::from_sources([("Foo.cs", FOO), ("Bar.cs", BAR)]);
        let symbols = compilation.symbols();
        let token = CancellationToken::new();

        let once = try_single_usage(&compilation, method(symbols, "Once"), &token).unwrap();
        assert_eq!(once.file, FileId::new(0));
        assert_eq!(once.node.text().to_string(), "Once");

        assert_eq!(find_references(&compilation, method(symbols, "Twice"), &token).len(), 2);
        assert!(try_single_usage(&compilation, method(symbols, "Twice"), &token).is_none());
        assert!(try_single_usage(&compilation, method(symbols, "Unused"), &token).is_none());
    }

    #[test]
    fn test_single_method_declaration() {
        let compilation = Compilation::from_sources([("Foo.cs", FOO), ("Bar.cs", BAR)]);
        let model = compilation.semantic_model(FileId::new(1)).unwrap();
        let (declaring, declaration) =
            try_single_method_declaration(&model, method(model.symbols(), "Once")).unwrap();
        assert_eq!(declaring.file(), FileId::new(0));
        assert_eq!(declaration.name().as_deref(), Some("Once"));

        let foo = model.symbols().type_by_name("N.Foo").unwrap();
        assert!(try_single_method_declaration(&model, foo).is_none());
    }

    #[test]
    fn test_cancelled_search_finds_nothing() {
        let compilation = Compilation::from_sources([("Foo.cs", FOO)]);
        let token = CancellationToken::new();
        token.cancel();
        let once = method(compilation.symbols(), "Once");
        assert!(find_references(&compilation, once, &token).is_empty());
    }
}
