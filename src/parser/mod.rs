//! Source front-end
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`source`]: Positions and ranges over a named source unit
//! - [`token`]: Token kinds, keyword categories and punctuators
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser struct, errors, and the top-level loop
//! - [`declarations`]: Attribute, modifier, `enum` and `import` grammar
//! - [`ast`]: AST node definitions
//!
//! # Parser Implementation
//!
//! Hand-written scanner and recursive descent parser.
//! No external parser generator dependencies.

pub mod ast;
pub mod declarations;
pub mod lexer;
pub mod parse;
pub mod source;
pub mod token;

pub use lexer::{lex, LexicalContext, Lexer};
pub use parse::{parse, ParseError, ParseOutcome, Parser};
pub use source::{SourceLocation, SourceRange, SourceUnit};

/// Lex and parse one source unit.
pub fn parse_source(unit: &SourceUnit) -> ParseOutcome {
    parse(&lex(unit))
}
