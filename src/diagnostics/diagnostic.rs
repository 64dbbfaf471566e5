//! Reported diagnostics.

use smol_str::SmolStr;

use super::descriptor::Severity;
use crate::base::{FileId, LineCol, LineIndex, TextRange};

/// One reported rule violation. Immutable once reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub id: SmolStr,
    pub severity: Severity,
    pub message: String,
    pub file: FileId,
    pub range: TextRange,
    /// Fix payload, e.g. the expected name for rename fixes
    pub properties: Vec<(SmolStr, String)>,
}

impl Diagnostic {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Start and end as 0-indexed line and column
    pub fn line_col(&self, index: &LineIndex) -> (LineCol, LineCol) {
        (index.line_col(self.range.start()), index.line_col(self.range.end()))
    }
}

/// Property key carrying the name a rename fix should use
pub const EXPECTED_NAME: &str = "ExpectedName";

/// Property key carrying the C# text of the type a fix should write
pub const EXPECTED_TYPE: &str = "ExpectedType";

/// Property key carrying the constructor parameter a property maps to
pub const ARGUMENT_NAME: &str = "ArgumentName";
