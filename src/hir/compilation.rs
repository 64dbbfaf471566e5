//! Compilations: a set of parsed documents plus their symbol table.

use std::sync::Arc;

use indexmap::IndexMap;
use rowan::GreenNode;
use smol_str::SmolStr;

use super::collect::build_symbol_table;
use super::framework::FRAMEWORK;
use super::semantic::SemanticModel;
use super::symbols::SymbolTable;
use crate::base::{FileId, LineIndex};
use crate::parser::{SyntaxError, SyntaxKind, SyntaxNode, parse};

/// File name endings of tool-generated sources, lowercase
const GENERATED_SUFFIXES: &[&str] = &[".g.cs", ".g.i.cs", ".designer.cs", ".generated.cs"];

/// One parsed source document.
///
/// Only the green tree is stored; red `SyntaxNode`s are created on demand per
/// thread.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: FileId,
    pub path: SmolStr,
    pub text: Arc<str>,
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
    /// Part of the built-in framework catalogue
    pub is_metadata: bool,
}

impl Document {
    fn parse(id: FileId, path: SmolStr, text: Arc<str>, is_metadata: bool) -> Self {
        let parsed = parse(&text);
        Self {
            id,
            path,
            text,
            green: parsed.green,
            errors: parsed.errors,
            is_metadata,
        }
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.text)
    }

    /// Tool-generated source: a `.g.cs` style file name, or an
    /// `<auto-generated>` comment ahead of the first code token.
    pub fn is_generated(&self) -> bool {
        let path = self.path.to_ascii_lowercase();
        if GENERATED_SUFFIXES.iter().any(|suffix| path.ends_with(suffix)) {
            return true;
        }
        self.syntax()
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .take_while(|token| token.kind().is_trivia())
            .filter(|token| matches!(token.kind(), SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT))
            .any(|comment| {
                let text = comment.text();
                text.contains("<auto-generated") || text.contains("<autogenerated")
            })
    }
}

/// An immutable set of documents with a shared symbol table.
///
/// Cloning is cheap. A `Compilation` is `Send + Sync` and can be analyzed
/// from many threads at once.
#[derive(Debug, Clone)]
pub struct Compilation {
    documents: Arc<IndexMap<FileId, Document>>,
    symbols: Arc<SymbolTable>,
}

impl Compilation {
    /// Build a compilation from `(path, text)` pairs. User documents get the
    /// ids `0..n` in the given order.
    pub fn from_sources<I, P, T>(sources: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<SmolStr>,
        T: Into<Arc<str>>,
    {
        let mut documents = IndexMap::new();
        for (index, (path, text)) in sources.into_iter().enumerate() {
            let id = FileId::new(index as u32);
            documents.insert(id, Document::parse(id, path.into(), text.into(), false));
        }
        let next = documents.len() as u32;
        for (offset, stub) in FRAMEWORK.iter().enumerate() {
            let id = FileId::new(next + offset as u32);
            documents.insert(
                id,
                Document {
                    id,
                    path: SmolStr::new(stub.path),
                    text: Arc::from(stub.text),
                    green: stub.green.clone(),
                    errors: Vec::new(),
                    is_metadata: true,
                },
            );
        }
        Self::from_documents(documents)
    }

    /// Single-document convenience constructor.
    pub fn from_text(text: &str) -> Self {
        Self::from_sources([("Document0.cs", text)])
    }

    fn from_documents(documents: IndexMap<FileId, Document>) -> Self {
        let symbols = build_symbol_table(&documents);
        tracing::debug!(
            documents = documents.len(),
            symbols = symbols.len(),
            "built compilation"
        );
        Self {
            documents: Arc::new(documents),
            symbols: Arc::new(symbols),
        }
    }

    /// A new compilation with the given documents' text replaced.
    pub fn with_texts(&self, changes: impl IntoIterator<Item = (FileId, String)>) -> Self {
        let mut documents: IndexMap<FileId, Document> = (*self.documents).clone();
        for (id, text) in changes {
            if let Some(doc) = documents.get_mut(&id) {
                *doc = Document::parse(id, doc.path.clone(), Arc::from(text), doc.is_metadata);
            }
        }
        Self::from_documents(documents)
    }

    /// User documents in insertion order
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values().filter(|d| !d.is_metadata)
    }

    /// Any document, including framework stubs
    pub fn document(&self, id: FileId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn document_by_path(&self, path: &str) -> Option<&Document> {
        self.documents.values().find(|d| d.path == path)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn semantic_model(&self, id: FileId) -> Option<SemanticModel<'_>> {
        let document = self.document(id)?;
        Some(SemanticModel::new(self, document))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_compilation_is_send_sync() {
        assert_send_sync::<Compilation>();
    }

    #[test]
    fn test_user_documents_come_first() {
        let compilation = Compilation::from_sources([("A.cs", "class A { }"), ("B.cs", "class B { }")]);
        let paths: Vec<_> = compilation.documents().map(|d| d.path.clone()).collect();
        assert_eq!(paths, vec!["A.cs", "B.cs"]);
        assert_eq!(compilation.document(FileId::new(0)).unwrap().path, "A.cs");
        assert!(compilation.symbols().type_by_name("A").is_some());
        assert!(compilation.symbols().type_by_name("System.Windows.DependencyObject").is_some());
    }

    #[test]
    fn test_with_texts_reparses() {
        let compilation = Compilation::from_text("class A { }");
        let updated = compilation.with_texts([(FileId::new(0), "class B { }".to_string())]);
        assert!(updated.symbols().type_by_name("A").is_none());
        assert!(updated.symbols().type_by_name("B").is_some());
        assert_eq!(&*compilation.document(FileId::new(0)).unwrap().text, "class A { }");
    }

    #[rstest]
    #[case::generated_suffix("MainWindow.g.cs", "class A { }")]
    #[case::intellisense_suffix("obj/MainWindow.g.i.cs", "class A { }")]
    #[case::designer("Resources.Designer.cs", "class A { }")]
    #[case::header(
        "A.cs",
        "// <auto-generated>\n//     This code was generated by a tool.\n// </auto-generated>\nclass A { }"
    )]
    #[case::block_header("A.cs", "/* <autogenerated /> */\nnamespace N { class A { } }")]
    fn test_generated_documents(#[case] path: &str, #[case] text: &str) {
        let compilation = Compilation::from_sources([(path, text)]);
        assert!(compilation.document(FileId::new(0)).unwrap().is_generated());
    }

    #[rstest]
    #[case::plain("A.cs", "class A { }")]
    #[case::comment_after_code("A.cs", "class A { }\n// <auto-generated>")]
    #[case::ordinary_header("Generator.cs", "// Copyright\nclass A { }")]
    fn test_user_documents(#[case] path: &str, #[case] text: &str) {
        let compilation = Compilation::from_sources([(path, text)]);
        assert!(!compilation.document(FileId::new(0)).unwrap().is_generated());
    }
}
