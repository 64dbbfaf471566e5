//! Node-keyed text editing.
//!
//! A [`DocumentEditor`] records edits against nodes of the original tree and
//! applies them in one pass. Offsets always refer to the original text, so
//! edits compose without bookkeeping.

use std::sync::Arc;

use thiserror::Error;

use crate::base::{FileId, TextRange, TextSize};
use crate::hir::Compilation;
use crate::parser::{AstNode, SyntaxNode, SyntaxToken, UsingDirective, compact_text};

/// Replace `range` of the original text with `insert`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub insert: String,
}

impl TextEdit {
    pub fn replace(range: TextRange, insert: impl Into<String>) -> Self {
        Self {
            range,
            insert: insert.into(),
        }
    }

    pub fn insert(offset: TextSize, insert: impl Into<String>) -> Self {
        Self::replace(TextRange::empty(offset), insert)
    }

    pub fn delete(range: TextRange) -> Self {
        Self::replace(range, String::new())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("overlapping edits at {first:?} and {second:?}")]
    Overlap { first: TextRange, second: TextRange },
    #[error("edit {range:?} is outside a document of length {len:?}")]
    OutOfBounds { range: TextRange, len: TextSize },
    #[error("unknown document {0}")]
    UnknownDocument(FileId),
}

/// Apply `edits` to `text` in one pass.
///
/// Identical edits collapse into one. Insertions at the same offset keep
/// their recorded order.
pub(crate) fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let len = TextSize::of(text);
    let mut unique: Vec<&TextEdit> = Vec::with_capacity(edits.len());
    for edit in edits {
        if edit.range.end() > len {
            return Err(EditError::OutOfBounds {
                range: edit.range,
                len,
            });
        }
        if !unique.contains(&edit) {
            unique.push(edit);
        }
    }
    unique.sort_by_key(|e| (e.range.start(), e.range.end()));

    for pair in unique.windows(2) {
        let (first, second) = (pair[0].range, pair[1].range);
        if second.start() < first.end() {
            return Err(EditError::Overlap { first, second });
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in unique {
        let start = usize::from(edit.range.start());
        out.push_str(&text[cursor..start]);
        out.push_str(&edit.insert);
        cursor = usize::from(edit.range.end());
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Collects edits for one document.
#[derive(Debug, Clone)]
pub struct DocumentEditor {
    file: FileId,
    text: Arc<str>,
    root: SyntaxNode,
    edits: Vec<TextEdit>,
}

impl DocumentEditor {
    pub fn for_document(compilation: &Compilation, file: FileId) -> Result<Self, EditError> {
        let document = compilation
            .document(file)
            .ok_or(EditError::UnknownDocument(file))?;
        Ok(Self {
            file,
            text: document.text.clone(),
            root: document.syntax(),
            edits: Vec::new(),
        })
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    pub(crate) fn into_edits(self) -> Vec<TextEdit> {
        self.edits
    }

    /// Replace the node's text. Surrounding trivia stays untouched.
    pub fn replace(&mut self, node: &SyntaxNode, text: impl Into<String>) {
        self.replace_range(node.text_range(), text);
    }

    pub fn replace_token(&mut self, token: &SyntaxToken, text: impl Into<String>) {
        self.replace_range(token.text_range(), text);
    }

    pub fn replace_range(&mut self, range: TextRange, text: impl Into<String>) {
        self.edits.push(TextEdit::replace(range, text));
    }

    pub fn insert_before(&mut self, node: &SyntaxNode, text: impl Into<String>) {
        self.edits
            .push(TextEdit::insert(node.text_range().start(), text));
    }

    /// Insert in front of a member together with its comments: `text` lands
    /// above any comment or doc comment lines that belong to `node`.
    pub fn insert_before_member(&mut self, node: &SyntaxNode, text: impl Into<String>) {
        let start = self.leading_comment_start(node);
        self.edits.push(TextEdit::insert(start, text));
    }

    pub fn insert_after(&mut self, node: &SyntaxNode, text: impl Into<String>) {
        self.edits.push(TextEdit::insert(node.text_range().end(), text));
    }

    /// Remove the node. When it sits alone on its lines, the lines go too,
    /// together with its comment lines and one adjacent blank line.
    pub fn remove(&mut self, node: &SyntaxNode) {
        let range = node.text_range();
        let text = &*self.text;
        let start = usize::from(self.leading_comment_start(node));
        let end = usize::from(range.end());
        let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i + 1);
        let alone = text[line_start..start].trim().is_empty() && text[end..line_end].trim().is_empty();
        if !alone {
            self.edits.push(TextEdit::delete(TextRange::new(
                TextSize::new(start as u32),
                range.end(),
            )));
            return;
        }

        let mut from = line_start;
        let mut to = line_end;
        if let Some(previous) = blank_line_before(text, line_start) {
            from = previous;
        } else if let Some(next) = blank_line_after(text, line_end) {
            to = next;
        }
        self.edits.push(TextEdit::delete(TextRange::new(
            TextSize::new(from as u32),
            TextSize::new(to as u32),
        )));
    }

    /// Add `using {namespace};` unless the document already has it.
    ///
    /// The directive joins the first group of usings, sorted with `System`
    /// namespaces first. Without any usings it goes to the top of the file.
    pub fn add_using(&mut self, namespace: &str) {
        let usings: Vec<UsingDirective> = self
            .root
            .descendants()
            .filter_map(UsingDirective::cast)
            .filter(|u| u.alias().is_none() && !u.is_static())
            .collect();
        if usings.iter().any(|u| using_name(u) == namespace) {
            return;
        }
        let directive = format!("using {namespace};");
        let Some(first) = usings.first() else {
            self.edits
                .push(TextEdit::insert(TextSize::new(0), format!("{directive}\n")));
            return;
        };

        let parent = first.syntax().parent();
        let group: Vec<&UsingDirective> = usings
            .iter()
            .filter(|u| u.syntax().parent() == parent)
            .collect();
        let indent = self.indentation(first.syntax());
        match group
            .iter()
            .copied()
            .find(|u| using_order(&using_name(u)) > using_order(namespace))
        {
            Some(next) => {
                let next = next.syntax().clone();
                self.insert_before(&next, format!("{directive}\n{indent}"));
            }
            None => {
                if let Some(last) = group.last() {
                    let last = last.syntax().clone();
                    self.insert_after(&last, format!("\n{indent}{directive}"));
                }
            }
        }
    }

    /// Start of the comment lines directly above `node`, or the node's own
    /// start. Only whole lines of `//`, `///` or `/* */` comments count, and
    /// a blank line or any code ends the run.
    pub fn leading_comment_start(&self, node: &SyntaxNode) -> TextSize {
        let text = &*self.text;
        let node_start = node.text_range().start();
        let start = usize::from(node_start);
        let mut line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
        if !text[line_start..start].trim().is_empty() {
            return node_start;
        }
        let mut first = start;
        while line_start > 0 {
            let previous = text[..line_start - 1].rfind('\n').map_or(0, |i| i + 1);
            let Some(comment) = comment_line_start(text, previous, line_start) else {
                break;
            };
            first = comment + indentation_len(&text[comment..]);
            line_start = comment;
        }
        TextSize::new(first as u32)
    }

    /// Whitespace between the start of the node's line and the node
    pub fn indentation(&self, node: &SyntaxNode) -> String {
        let start = usize::from(node.text_range().start());
        let line_start = self.text[..start].rfind('\n').map_or(0, |i| i + 1);
        self.text[line_start..start]
            .chars()
            .take_while(|c| c.is_whitespace())
            .collect()
    }

    pub fn apply(&self) -> Result<String, EditError> {
        apply_edits(&self.text, &self.edits)
    }
}

fn using_name(using: &UsingDirective) -> String {
    using
        .name()
        .map(|n| compact_text(n.syntax()))
        .unwrap_or_default()
}

fn using_order(namespace: &str) -> (bool, &str) {
    let system = namespace == "System" || namespace.starts_with("System.");
    (!system, namespace)
}

/// Start of the comment occupying the line `line_start..line_end`, which
/// may be the first line of a multi-line block comment.
fn comment_line_start(text: &str, line_start: usize, line_end: usize) -> Option<usize> {
    let line = text[line_start..line_end].trim();
    if line.starts_with("//") {
        return Some(line_start);
    }
    if !line.ends_with("*/") {
        return None;
    }
    let open = text[..line_end].rfind("/*")?;
    let open_line = text[..open].rfind('\n').map_or(0, |i| i + 1);
    text[open_line..open].trim().is_empty().then_some(open_line)
}

fn indentation_len(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Start of the blank line ending right before `line_start`
fn blank_line_before(text: &str, line_start: usize) -> Option<usize> {
    if line_start == 0 {
        return None;
    }
    let previous_start = text[..line_start - 1].rfind('\n').map_or(0, |i| i + 1);
    text[previous_start..line_start]
        .trim()
        .is_empty()
        .then_some(previous_start)
}

/// End of the blank line starting at `line_end`
fn blank_line_after(text: &str, line_end: usize) -> Option<usize> {
    let rest = &text[line_end..];
    let newline = rest.find('\n')?;
    rest[..newline]
        .trim()
        .is_empty()
        .then_some(line_end + newline + 1)
}
