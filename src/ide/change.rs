//! Edit sets spanning several documents.

use indexmap::IndexMap;

use super::editor::{DocumentEditor, EditError, TextEdit, apply_edits};
use crate::base::FileId;
use crate::hir::Compilation;

/// Edits grouped per document, in the order documents were first touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolutionChange {
    edits: IndexMap<FileId, Vec<TextEdit>>,
}

impl SolutionChange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_document(&mut self, editor: DocumentEditor) {
        let file = editor.file();
        self.add_edits(file, editor.into_edits());
    }

    pub fn add_edits(&mut self, file: FileId, edits: impl IntoIterator<Item = TextEdit>) {
        let slot = self.edits.entry(file).or_default();
        for edit in edits {
            if !slot.contains(&edit) {
                slot.push(edit);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edits.values().all(|e| e.is_empty())
    }

    pub fn documents(&self) -> impl Iterator<Item = FileId> + '_ {
        self.edits.keys().copied()
    }

    pub fn edits(&self, file: FileId) -> &[TextEdit] {
        self.edits.get(&file).map(Vec::as_slice).unwrap_or_default()
    }

    /// First edit of `other` overlapping an edit already in `self`
    pub fn conflict_with(&self, other: &SolutionChange) -> Option<EditError> {
        for (file, theirs) in &other.edits {
            let Some(ours) = self.edits.get(file) else {
                continue;
            };
            for a in ours {
                for b in theirs {
                    if a != b && overlaps(a, b) {
                        return Some(EditError::Overlap {
                            first: a.range,
                            second: b.range,
                        });
                    }
                }
            }
        }
        None
    }

    pub fn merge(&mut self, other: SolutionChange) {
        for (file, edits) in other.edits {
            self.add_edits(file, edits);
        }
    }

    /// New document texts and the compilation rebuilt from them.
    pub fn apply(
        &self,
        compilation: &Compilation,
    ) -> Result<(IndexMap<FileId, String>, Compilation), EditError> {
        let mut texts = IndexMap::new();
        for (&file, edits) in &self.edits {
            let document = compilation
                .document(file)
                .ok_or(EditError::UnknownDocument(file))?;
            texts.insert(file, apply_edits(&document.text, edits)?);
        }
        let updated = compilation.with_texts(texts.iter().map(|(&f, t)| (f, t.clone())));
        Ok((texts, updated))
    }
}

/// Inserts at the same offset do not overlap; an insert strictly inside a
/// replaced range does.
fn overlaps(a: &TextEdit, b: &TextEdit) -> bool {
    let key = |e: &TextEdit| (e.range.start(), e.range.end());
    let (first, second) = if key(a) <= key(b) { (a, b) } else { (b, a) };
    second.range.start() < first.range.end()
}

/// A named fix.
#[derive(Clone, Debug)]
pub struct CodeAction {
    pub title: String,
    /// Actions sharing a key are the same fix applied to different nodes
    pub equivalence_key: &'static str,
    pub change: SolutionChange,
}
