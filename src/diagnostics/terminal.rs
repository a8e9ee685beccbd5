//! Line-per-diagnostic terminal output
//!
//! Styling uses crossterm's [`Stylize`] and is only applied when the reporter
//! was created with colors enabled (normally: when stderr is a terminal).

use super::{Diagnostic, DiagnosticConsumer, Severity};
use crossterm::style::Stylize;
use std::io::{self, Write};

pub struct TerminalReporter<W: Write> {
    out: W,
    colored: bool,
    errors: usize,
    warnings: usize,
}

impl TerminalReporter<io::Stderr> {
    pub fn stderr(colored: bool) -> Self {
        Self::new(io::stderr(), colored)
    }
}

impl<W: Write> TerminalReporter<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self {
            out,
            colored,
            errors: 0,
            warnings: 0,
        }
    }

    /// Number of error diagnostics written so far
    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagnosticConsumer for TerminalReporter<W> {
    fn consume(&mut self, diagnostic: Diagnostic) -> io::Result<()> {
        match diagnostic.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }

        if !self.colored {
            return writeln!(self.out, "{}", diagnostic);
        }

        let severity = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        writeln!(
            self.out,
            "{} {}: {}",
            diagnostic.range.describe().dim(),
            severity,
            diagnostic.message
        )
    }
}
