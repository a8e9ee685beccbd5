//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, token helpers, the top-level loop and
//!   resynchronization after a failed declaration
//! - `declarations`: attributes, access modifiers, `enum` and `import`
//!
//! # Errors
//!
//! Two tiers. A production that cannot continue (missing keyword, name or
//! brace) returns a [`ParseError`] and yields no node. Input that is malformed
//! but still interpretable, such as `public(set)` on a declaration, is
//! recorded in the parse's [`DiagnosticPool`] and parsing carries on with a
//! sane default.
//!
//! The parser works only on tokens; comments and whitespace are skipped.

use crate::diagnostics::DiagnosticPool;
use crate::parser::ast::*;
use crate::parser::lexer::LexicalContext;
use crate::parser::source::{SourceLocation, SourceRange};
use crate::parser::token::{KeywordCategory, Punctuator, Token, TokenKind};
use std::fmt;
use std::sync::Arc;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub range: SourceRange,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error at {}: {}", self.range, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Everything one parse produced
#[derive(Debug)]
pub struct ParseOutcome {
    pub root: TopLevelDeclaration,
    /// Recoverable problems; the affected nodes are still in `root`
    pub diagnostics: DiagnosticPool,
    /// Declarations that could not be built at all
    pub failures: Vec<ParseError>,
}

impl ParseOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parse a lexed source unit.
pub fn parse(context: &LexicalContext) -> ParseOutcome {
    Parser::new(context).parse_top_level()
}

/// Recursive descent parser over a [`LexicalContext`]
pub struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    /// Index of the next significant token, or `tokens.len()` at end
    pub(crate) position: usize,
    pub(crate) previous: Option<usize>,
    pub(crate) diagnostics: DiagnosticPool,
    path: Arc<str>,
}

impl<'a> Parser<'a> {
    pub fn new(context: &'a LexicalContext) -> Self {
        let mut parser = Self {
            tokens: context.tokens(),
            position: 0,
            previous: None,
            diagnostics: DiagnosticPool::new(),
            path: context.path().clone(),
        };
        parser.skip_trivia();
        parser
    }

    /// Parse every top-level statement.
    ///
    /// A failed declaration is recorded and the parser resynchronizes at the
    /// next token that can begin a declaration.
    pub fn parse_top_level(mut self) -> ParseOutcome {
        let mut root = TopLevelDeclaration::new();
        let mut failures = Vec::new();

        while !self.is_at_end() {
            if self.match_punctuator(Punctuator::Semicolon).is_some() {
                continue;
            }

            let start = self.position;
            match self.parse_declaration() {
                Ok(decl) => root.statements.push(Statement::Declaration(decl)),
                Err(err) => {
                    failures.push(err);
                    self.synchronize(start);
                }
            }
        }

        ParseOutcome {
            root,
            diagnostics: self.diagnostics,
            failures,
        }
    }

    /// Skip to the next declaration start outside any braces opened after
    /// the failure point, always consuming at least one token.
    pub(crate) fn synchronize(&mut self, start: usize) {
        if self.position == start {
            self.advance();
        }

        let mut depth: isize = 0;
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Punctuator(Punctuator::LeftBrace) => depth += 1,
                TokenKind::Punctuator(Punctuator::RightBrace) => depth -= 1,
                _ if depth <= 0 && self.is_declaration_start() => break,
                _ => {}
            }
            self.advance();
        }
    }

    // ===== Helper methods =====

    pub(crate) fn is_declaration_start(&self) -> bool {
        match self.peek().map(|token| &token.kind) {
            Some(TokenKind::Punctuator(Punctuator::At)) => true,
            Some(TokenKind::Keyword(keyword)) => {
                AccessLevel::from_keyword(keyword.text).is_some()
                    || matches!(keyword.text, "enum" | "import")
            }
            _ => false,
        }
    }

    fn skip_trivia(&mut self) {
        while self
            .tokens
            .get(self.position)
            .is_some_and(Token::is_trivia)
        {
            self.position += 1;
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position)?;
        self.previous = Some(self.position);
        self.position += 1;
        self.skip_trivia();
        Some(token)
    }

    /// Whether the current token directly follows the previous one, with no
    /// trivia between them.
    pub(crate) fn is_adjacent_to_previous(&self) -> bool {
        self.previous
            .is_some_and(|previous| previous + 1 == self.position)
    }

    pub(crate) fn current_range(&self) -> SourceRange {
        match self.peek() {
            Some(token) => token.range.clone(),
            None => self.end_range(),
        }
    }

    /// Empty range just past the last token.
    fn end_range(&self) -> SourceRange {
        let location = match self.tokens.last() {
            Some(token) => token.range.end.clone(),
            None => SourceLocation::new(self.path.clone(), 1, 1),
        };
        SourceRange::empty(location)
    }

    /// Error at the current token, naming what was found there.
    pub(crate) fn error_here(&self, message: &str) -> ParseError {
        let found = match self.peek() {
            Some(token) => token.to_string(),
            None => "end of file".to_string(),
        };
        ParseError {
            message: format!("{}, found {}", message, found),
            range: self.current_range(),
        }
    }

    pub(crate) fn check_punctuator(&self, punctuator: Punctuator) -> bool {
        matches!(
            self.peek().map(|token| &token.kind),
            Some(TokenKind::Punctuator(p)) if *p == punctuator
        )
    }

    pub(crate) fn match_punctuator(&mut self, punctuator: Punctuator) -> Option<&'a Token> {
        if self.check_punctuator(punctuator) {
            self.advance()
        } else {
            None
        }
    }

    pub(crate) fn expect_punctuator(
        &mut self,
        punctuator: Punctuator,
        ctx: &str,
    ) -> Result<&'a Token, ParseError> {
        match self.match_punctuator(punctuator) {
            Some(token) => Ok(token),
            None => Err(self.error_here(&format!("Expected '{}' {}", punctuator.as_str(), ctx))),
        }
    }

    pub(crate) fn check_keyword(&self, text: &str) -> bool {
        matches!(
            self.peek().map(|token| &token.kind),
            Some(TokenKind::Keyword(keyword)) if keyword.text == text
        )
    }

    pub(crate) fn expect_keyword(&mut self, text: &str, ctx: &str) -> Result<&'a Token, ParseError> {
        if self.check_keyword(text) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.error_here(&format!("Expected '{}' {}", text, ctx)))
    }

    /// Plain or backtick identifier, or a contextual keyword used as a name.
    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<(String, SourceRange), ParseError> {
        let name = match self.peek().map(|token| &token.kind) {
            Some(TokenKind::Identifier(name)) | Some(TokenKind::BacktickIdentifier(name)) => {
                name.clone()
            }
            Some(TokenKind::Keyword(keyword))
                if matches!(keyword.category, KeywordCategory::Contextual(_)) =>
            {
                keyword.text.to_string()
            }
            _ => return Err(self.error_here(&format!("Expected identifier {}", ctx))),
        };
        let range = self.current_range();
        self.advance();
        Ok((name, range))
    }
}
