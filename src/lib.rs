//! # Introduction
//!
//! Quill turns source text of a curly-brace, statically typed language into a
//! token stream and then into an AST, keeping the exact source range of every
//! token and node. It is meant as a base for linters, formatters and
//! compilers that need precise, recoverable parsing rather than a pass/fail
//! verdict.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → LexicalContext → Parser → AST + Diagnostics
//! ```
//!
//! 1. [`parser::lexer`]: total scanner. Unrecognized input becomes `Invalid`
//!    tokens; lexing never fails.
//! 2. [`parser::parse`]: recursive descent over the tokens. Structural
//!    failures drop the affected declaration; malformed modifiers are
//!    reported and recovered from.
//! 3. [`diagnostics`]: per-parse diagnostic pool and pluggable consumers.
//!
//! ## Supported grammar
//!
//! Attributes (`@name`, optionally with an argument clause), access-level
//! modifiers (`public`, `internal`, `private`), `enum` declarations with
//! `case` clauses, and `import` declarations.

pub mod diagnostics;
pub mod parser;
