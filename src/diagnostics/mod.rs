//! Diagnostics collected while parsing
//!
//! A [`DiagnosticPool`] belongs to exactly one parse: it is created empty when
//! the parse starts, filled as productions recover from malformed input, and
//! handed to the caller, who drains it into a [`DiagnosticConsumer`]. Nothing
//! here is global, so independent source units can be parsed concurrently.

pub mod terminal;

use crate::parser::source::SourceRange;
use std::fmt;
use std::io;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A message tied to the source range it describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub range: SourceRange,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, range: SourceRange) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            range,
        }
    }

    pub fn warning(message: impl Into<String>, range: SourceRange) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            range,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.range, self.severity, self.message)
    }
}

/// Receives drained diagnostics; formatting and output medium are up to it.
pub trait DiagnosticConsumer {
    fn consume(&mut self, diagnostic: Diagnostic) -> io::Result<()>;
}

impl DiagnosticConsumer for Vec<Diagnostic> {
    fn consume(&mut self, diagnostic: Diagnostic) -> io::Result<()> {
        self.push(diagnostic);
        Ok(())
    }
}

/// Per-parse collection of diagnostics
#[derive(Debug, Default)]
pub struct DiagnosticPool {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, message: impl Into<String>, range: SourceRange) {
        self.push(Diagnostic::error(message, range));
    }

    pub fn warning(&mut self, message: impl Into<String>, range: SourceRange) {
        self.push(Diagnostic::warning(message, range));
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    /// Take ownership of everything collected so far, leaving the pool empty.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Hand every diagnostic to `consumer` in order, leaving the pool empty.
    ///
    /// Stops at the first consumer error; diagnostics not yet delivered are
    /// discarded along with the rest of the pool.
    pub fn report<C: DiagnosticConsumer + ?Sized>(&mut self, consumer: &mut C) -> io::Result<()> {
        for diagnostic in self.drain() {
            consumer.consume(diagnostic)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}
