//! Source position model
//!
//! A [`SourceUnit`] is a named piece of text handed to the lexer. Every token
//! and AST node carries a [`SourceRange`] built from two [`SourceLocation`]s
//! over that unit. Lines and columns are 1-based; columns count UTF-16 code
//! units, and a range's end is the position just past its last consumed unit.

use std::fmt;
use std::sync::Arc;

/// A named source text, decoupled from however it was read.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub path: Arc<str>,
    pub text: String,
}

impl SourceUnit {
    pub fn new(path: impl Into<Arc<str>>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// A point in a source unit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub path: Arc<str>,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(path: Arc<str>, line: usize, column: usize) -> Self {
        Self { path, line, column }
    }

    /// Lexicographic `(line, column)` comparison; the path is ignored.
    pub fn is_at_or_before(&self, other: &SourceLocation) -> bool {
        (self.line, self.column) <= (other.line, other.column)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

/// Half-open span between two locations of the same unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        debug_assert!(start.is_at_or_before(&end), "range end precedes start");
        Self { start, end }
    }

    /// Zero-width range at `location`.
    pub fn empty(location: SourceLocation) -> Self {
        Self {
            start: location.clone(),
            end: location,
        }
    }

    /// Range from the start of `self` to the end of `other`.
    pub fn to(&self, other: &SourceRange) -> SourceRange {
        SourceRange::new(self.start.clone(), other.end.clone())
    }

    /// Renders `<path>[<startLine>:<startColumn>-<endLine>:<endColumn>]`.
    ///
    /// Conformance tests compare against this string verbatim.
    pub fn describe(&self) -> String {
        format!(
            "{}[{}:{}-{}:{}]",
            self.start.path, self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
