//! Declaration parsing implementation
//!
//! Every declaration shares the same head: attributes, then at most one
//! access-level modifier, then the declaration keyword.
//!
//! # Grammar
//!
//! ```text
//! declaration   ::= attribute* access_level? (enum_decl | import_decl)
//! attribute     ::= "@" identifier balanced_parens?
//! access_level  ::= ("public" | "internal" | "private") ("(" "set" ")")?
//! enum_decl     ::= "enum" identifier "{" (case_clause | ";")* "}"
//! case_clause   ::= "case" identifier ("," identifier)*
//! import_decl   ::= "import" identifier ("." identifier)*
//! ```
//!
//! A setter-scoped modifier such as `private(set)` is valid grammar but not
//! meaningful on a declaration: it is reported, dropped, and parsing goes on
//! with [`AccessLevel::Default`].

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::source::SourceRange;
use crate::parser::token::{Punctuator, TokenKind};

/// Attributes and access level read before the declaration keyword
pub(crate) struct DeclarationHead {
    pub attributes: Vec<Attribute>,
    pub access_level: AccessLevel,
    /// Start of the first attribute or modifier, if any
    pub start: Option<SourceRange>,
}

impl<'a> Parser<'a> {
    /// Parse one declaration
    pub(crate) fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let attributes = self.parse_attributes()?;
        let (access_level, modifier_range) = self.parse_access_level_modifier()?;
        let start = attributes
            .first()
            .map(|attribute| attribute.range.clone())
            .or(modifier_range);
        let head = DeclarationHead {
            attributes,
            access_level,
            start,
        };

        if self.check_keyword("enum") {
            self.parse_enum_declaration(head).map(Declaration::Enum)
        } else if self.check_keyword("import") {
            self.parse_import_declaration(head).map(Declaration::Import)
        } else {
            Err(self.error_here("Expected declaration"))
        }
    }

    pub(crate) fn parse_attributes(&mut self) -> Result<Vec<Attribute>, ParseError> {
        let mut attributes = Vec::new();
        while let Some(at) = self.match_punctuator(Punctuator::At) {
            let (name, name_range) = self.expect_identifier("after '@'")?;
            let (arguments, end) = match self.parse_attribute_arguments()? {
                Some((text, range)) => (Some(text), range),
                None => (None, name_range),
            };
            attributes.push(Attribute {
                name,
                arguments,
                range: at.range.to(&end),
            });
        }
        Ok(attributes)
    }

    /// `( ... )` directly after an attribute name, kept verbatim.
    fn parse_attribute_arguments(&mut self) -> Result<Option<(String, SourceRange)>, ParseError> {
        if !self.is_adjacent_to_previous() || !self.check_punctuator(Punctuator::LeftParen) {
            return Ok(None);
        }

        let open = self.position;
        let open_range = self.current_range();
        let mut depth = 0usize;
        loop {
            let Some(token) = self.advance() else {
                return Err(ParseError {
                    message: "Expected ')' to close attribute arguments".to_string(),
                    range: open_range,
                });
            };
            match token.kind {
                TokenKind::Punctuator(Punctuator::LeftParen) => depth += 1,
                TokenKind::Punctuator(Punctuator::RightParen) => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }

        let close = self.previous.unwrap_or(open);
        let text: String = self.tokens[open..=close]
            .iter()
            .map(|token| token.source_text())
            .collect();
        let range = open_range.to(&self.tokens[close].range);
        Ok(Some((text, range)))
    }

    /// Returns the accepted access level and the modifier's range as written.
    /// A rejected `(set)` modifier yields `AccessLevel::Default` plus a
    /// diagnostic.
    pub(crate) fn parse_access_level_modifier(
        &mut self,
    ) -> Result<(AccessLevel, Option<SourceRange>), ParseError> {
        let Some(token) = self.peek() else {
            return Ok((AccessLevel::Default, None));
        };
        let TokenKind::Keyword(keyword) = &token.kind else {
            return Ok((AccessLevel::Default, None));
        };
        let Some(level) = AccessLevel::from_keyword(keyword.text) else {
            return Ok((AccessLevel::Default, None));
        };
        self.advance();

        if self.match_punctuator(Punctuator::LeftParen).is_none() {
            return Ok((level, Some(token.range.clone())));
        }
        self.expect_keyword("set", &format!("in '{}' modifier", keyword.text))?;
        let close = self.expect_punctuator(Punctuator::RightParen, "after 'set'")?;

        let range = token.range.to(&close.range);
        self.diagnostics.error(
            format!(
                "'{}' modifier cannot be applied to this declaration.",
                keyword.text
            ),
            range.clone(),
        );
        Ok((AccessLevel::Default, Some(range)))
    }

    /// Parse enum declaration: enum name { case ... }
    pub(crate) fn parse_enum_declaration(
        &mut self,
        head: DeclarationHead,
    ) -> Result<EnumDeclaration, ParseError> {
        let keyword = self.expect_keyword("enum", "to begin enum declaration")?;
        let (name, _) = self.expect_identifier("after 'enum'")?;

        self.expect_punctuator(Punctuator::LeftBrace, "after enum name")?;

        let mut cases = Vec::new();
        let close = loop {
            if let Some(close) = self.match_punctuator(Punctuator::RightBrace) {
                break close;
            }
            if self.check_keyword("case") {
                cases.push(self.parse_enum_case()?);
            } else if self.match_punctuator(Punctuator::Semicolon).is_none() {
                return Err(self.error_here("Expected 'case' or '}' in enum body"));
            }
        };

        let start = head.start.unwrap_or_else(|| keyword.range.clone());
        Ok(EnumDeclaration {
            name,
            attributes: head.attributes,
            access_level: head.access_level,
            cases,
            range: start.to(&close.range),
        })
    }

    /// Parse case clause: case A, B, C
    pub(crate) fn parse_enum_case(&mut self) -> Result<EnumCase, ParseError> {
        let keyword = self.expect_keyword("case", "in enum body")?;

        let first = self.parse_enum_element()?;
        let mut end = first.range.clone();
        let mut elements = vec![first];
        while self.match_punctuator(Punctuator::Comma).is_some() {
            let element = self.parse_enum_element()?;
            end = element.range.clone();
            elements.push(element);
        }

        Ok(EnumCase {
            elements,
            range: keyword.range.to(&end),
        })
    }

    fn parse_enum_element(&mut self) -> Result<EnumElement, ParseError> {
        let (name, range) = self.expect_identifier("for enum case")?;
        Ok(EnumElement { name, range })
    }

    /// Parse import declaration: import A.B.C
    pub(crate) fn parse_import_declaration(
        &mut self,
        head: DeclarationHead,
    ) -> Result<ImportDeclaration, ParseError> {
        let keyword = self.expect_keyword("import", "to begin import declaration")?;

        let (first, mut end) = self.expect_identifier("after 'import'")?;
        let mut path = vec![first];
        while self.match_punctuator(Punctuator::Period).is_some() {
            let (segment, range) = self.expect_identifier("in import path")?;
            path.push(segment);
            end = range;
        }

        let start = head.start.unwrap_or_else(|| keyword.range.clone());
        Ok(ImportDeclaration {
            attributes: head.attributes,
            access_level: head.access_level,
            path,
            range: start.to(&end),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::lex;
    use crate::parser::parse::{parse, ParseOutcome};
    use crate::parser::source::SourceUnit;

    fn parse_source(source: &str) -> ParseOutcome {
        parse(&lex(&SourceUnit::new("test.swift", source)))
    }

    fn only_declaration(outcome: &ParseOutcome) -> &Declaration {
        assert!(outcome.is_success(), "failures: {:?}", outcome.failures);
        assert_eq!(outcome.root.statements.len(), 1);
        outcome.root.statements[0]
            .as_declaration()
            .expect("Expected declaration")
    }

    #[test]
    fn test_attribute_arguments_kept_verbatim() {
        let outcome = parse_source("@available(iOS 10, *) @objc enum foo {}");
        let decl = only_declaration(&outcome);
        let attributes = decl.attributes();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].name, "available");
        assert_eq!(attributes[0].arguments.as_deref(), Some("(iOS 10, *)"));
        assert_eq!(attributes[0].range.describe(), "test.swift[1:1-1:22]");
        assert_eq!(attributes[1].arguments, None);
        assert_eq!(decl.to_string(), "@available(iOS 10, *) @objc enum foo {}");
    }

    #[test]
    fn test_unclosed_attribute_arguments() {
        let outcome = parse_source("@available(iOS enum foo {}");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(
            outcome.failures[0].message,
            "Expected ')' to close attribute arguments"
        );
    }

    #[test]
    fn test_modifier_with_unexpected_parenthesized_word() {
        let outcome = parse_source("public(get) enum foo {}");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(
            outcome.failures[0].message,
            "Expected 'set' in 'public' modifier, found keyword 'get'"
        );
        // resynchronizes at `enum`
        assert_eq!(outcome.root.statements.len(), 1);
    }

    #[test]
    fn test_rejected_modifier_still_starts_range() {
        let outcome = parse_source("private (set) enum foo {}");
        let decl = only_declaration(&outcome);
        assert_eq!(decl.access_level(), AccessLevel::Default);
        assert_eq!(decl.range().describe(), "test.swift[1:1-1:26]");
        let diagnostics: Vec<_> = outcome.diagnostics.iter().collect();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range.describe(), "test.swift[1:1-1:14]");
    }

    #[test]
    fn test_backtick_and_contextual_names() {
        let outcome = parse_source("enum `default` { case get, `case`, willSet }");
        let decl = only_declaration(&outcome);
        let decl = decl.as_enum().expect("Expected enum");
        assert_eq!(decl.name, "default");
        let names: Vec<_> = decl.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["get", "case", "willSet"]);
    }

    #[test]
    fn test_case_clause_ranges() {
        let outcome = parse_source("enum foo {\n  case A, B\n  case C // trailing\n}");
        let decl = only_declaration(&outcome).as_enum().expect("Expected enum");
        let ranges: Vec<_> = decl.cases.iter().map(|c| c.range.describe()).collect();
        assert_eq!(ranges, vec!["test.swift[2:3-2:12]", "test.swift[3:3-3:9]"]);
        assert_eq!(decl.range.describe(), "test.swift[1:1-4:2]");
    }

    #[test]
    fn test_enum_body_rejects_other_tokens() {
        let outcome = parse_source("enum foo { let x }");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(
            outcome.failures[0].message,
            "Expected 'case' or '}' in enum body, found keyword 'let'"
        );
    }

    #[test]
    fn test_trailing_comma_in_case_fails() {
        let outcome = parse_source("enum foo { case A, }");
        assert_eq!(
            outcome.failures[0].message,
            "Expected identifier for enum case, found '}'"
        );
    }

    #[test]
    fn test_import_declaration() {
        let outcome = parse_source("@testable internal import Foundation.Data");
        let decl = only_declaration(&outcome);
        match decl {
            Declaration::Import(import) => {
                assert_eq!(import.path, vec!["Foundation", "Data"]);
                assert_eq!(import.access_level, AccessLevel::Internal);
                assert_eq!(import.range.describe(), "test.swift[1:1-1:42]");
            }
            other => panic!("Expected import, got {:?}", other),
        }
    }

    #[test]
    fn test_setter_modifier_on_import_is_diagnosed() {
        let outcome = parse_source("public(set) import Foo");
        let decl = only_declaration(&outcome);
        assert_eq!(decl.access_level(), AccessLevel::Default);
        let messages: Vec<_> = outcome.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["'public' modifier cannot be applied to this declaration."]
        );
    }
}
