//! Lexer (tokenizer)
//!
//! Converts a [`SourceUnit`] into a [`LexicalContext`]: every character of the
//! input ends up in exactly one [`Token`], trivia included, so the token
//! ranges tile the input and the concatenated token texts reproduce it.
//!
//! # Scanning
//!
//! Each step looks at the first character to pick a [`Gate`]. A gate owns an
//! ordered list of recognizers; the first one that matches wins, which is how
//! ambiguities such as `true` vs. an identifier or `0x1p4` vs. `0x1` are
//! settled. When no recognizer matches, a single character is emitted as
//! [`TokenKind::Invalid`] so the scan always makes progress. Lexing never
//! fails; judging bad input is left to the parser.

use super::source::{SourceLocation, SourceRange, SourceUnit};
use super::token::{lookup_keyword, Control, Literal, Punctuator, Token, TokenKind};
use std::sync::Arc;

/// Ordered token sequence produced for one source unit
#[derive(Debug, Clone)]
pub struct LexicalContext {
    path: Arc<str>,
    tokens: Vec<Token>,
}

impl LexicalContext {
    pub fn new(path: Arc<str>) -> Self {
        Self {
            path,
            tokens: Vec::new(),
        }
    }

    fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn path(&self) -> &Arc<str> {
        &self.path
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Tokens the parser cares about: everything except trivia.
    pub fn significant(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|token| !token.is_trivia())
    }

    /// Reassemble the original input from token spellings.
    pub fn source_text(&self) -> String {
        self.tokens.iter().map(|token| token.source_text()).collect()
    }
}

impl<'a> IntoIterator for &'a LexicalContext {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Lex a whole source unit.
pub fn lex(unit: &SourceUnit) -> LexicalContext {
    Lexer::new(unit).tokenize()
}

/// A recognizer's match: the token kind and how many characters it covers.
struct Scanned {
    kind: TokenKind,
    len: usize,
}

type Recognizer = fn(&Lexer) -> Option<Scanned>;

/// First-character dispatch bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    StringLiteral,
    NumericLiteral,
    IdentifierOrKeyword,
    Comment,
    Punctuation,
    Control,
}

const STRING_GATE: &[Recognizer] = &[Lexer::string_literal];

// Longer forms first: a hex float must not be cut short at its hex mantissa.
const NUMERIC_GATE: &[Recognizer] = &[
    Lexer::hex_float,
    Lexer::hex_integer,
    Lexer::binary_integer,
    Lexer::octal_integer,
    Lexer::decimal_float,
    Lexer::decimal_integer,
];

const IDENTIFIER_GATE: &[Recognizer] = &[
    Lexer::literal_word,
    Lexer::keyword,
    Lexer::backtick_identifier,
    Lexer::implicit_parameter,
    Lexer::identifier,
];

const COMMENT_GATE: &[Recognizer] = &[Lexer::line_comment, Lexer::block_comment];

const PUNCTUATION_GATE: &[Recognizer] = &[
    Lexer::arrow,
    Lexer::dot_operator,
    Lexer::delimiter,
    Lexer::operator_run,
];

const CONTROL_GATE: &[Recognizer] = &[Lexer::control];

impl Gate {
    fn recognizers(self) -> &'static [Recognizer] {
        match self {
            Gate::StringLiteral => STRING_GATE,
            Gate::NumericLiteral => NUMERIC_GATE,
            Gate::IdentifierOrKeyword => IDENTIFIER_GATE,
            Gate::Comment => COMMENT_GATE,
            Gate::Punctuation => PUNCTUATION_GATE,
            Gate::Control => CONTROL_GATE,
        }
    }
}

fn is_identifier_head(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_identifier_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn is_operator_char(ch: char) -> bool {
    matches!(
        ch,
        '/' | '=' | '-' | '+' | '!' | '*' | '%' | '<' | '>' | '&' | '|' | '^' | '~' | '?'
    )
}

fn is_binary_digit(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

fn is_decimal_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

/// Lexer for one source unit
pub struct Lexer {
    path: Arc<str>,
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(unit: &SourceUnit) -> Self {
        Self {
            path: unit.path.clone(),
            input: unit.text.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(mut self) -> LexicalContext {
        let mut context = LexicalContext::new(self.path.clone());

        while let Some(ch) = self.peek() {
            let scanned = self
                .gate()
                .recognizers()
                .iter()
                .find_map(|recognize| recognize(&self))
                .unwrap_or_else(|| Scanned {
                    kind: TokenKind::Invalid(ch.to_string()),
                    len: 1,
                });
            let token = self.consume(scanned);
            context.push(token);
        }

        context
    }

    fn gate(&self) -> Gate {
        let Some(ch) = self.peek() else {
            return Gate::Control;
        };
        let next = self.peek_ahead(1);

        match ch {
            '"' => Gate::StringLiteral,
            '0'..='9' => Gate::NumericLiteral,
            '-' if next.is_some_and(is_decimal_digit) => Gate::NumericLiteral,
            '`' if next.is_some_and(is_identifier_head) => Gate::IdentifierOrKeyword,
            '$' if next.is_some_and(is_decimal_digit) => Gate::IdentifierOrKeyword,
            '/' if matches!(next, Some('/' | '*')) => Gate::Comment,
            c if is_identifier_head(c) => Gate::IdentifierOrKeyword,
            c if is_operator_char(c) || Punctuator::from_delimiter(c).is_some() => {
                Gate::Punctuation
            }
            _ => Gate::Control,
        }
    }

    fn consume(&mut self, scanned: Scanned) -> Token {
        let start = self.current_location();
        for _ in 0..scanned.len {
            self.advance();
        }
        Token::new(scanned.kind, SourceRange::new(start, self.current_location()))
    }

    // ===== String literals =====

    /// `"..."`; `\(` opens an interpolation whose parentheses are counted
    /// without regard to escapes. Ends at the first unescaped quote outside
    /// any interpolation.
    fn string_literal(&self) -> Option<Scanned> {
        if self.peek() != Some('"') {
            return None;
        }

        let mut offset = 1;
        let mut escaped = false;
        let mut depth = 0usize;
        let mut interpolated = false;

        loop {
            let ch = self.peek_ahead(offset)?;
            if depth > 0 {
                match ch {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
            } else if matches!(ch, '\n' | '\r') {
                return None;
            } else if escaped {
                if ch == '(' {
                    depth = 1;
                    interpolated = true;
                }
                escaped = false;
            } else {
                match ch {
                    '\\' => escaped = true,
                    '"' => break,
                    _ => {}
                }
            }
            offset += 1;
        }

        let raw = self.slice(1, offset);
        let literal = if interpolated {
            Literal::InterpolatedString(raw)
        } else {
            Literal::StaticString(raw)
        };
        Some(Scanned {
            kind: TokenKind::Literal(literal),
            len: offset + 1,
        })
    }

    // ===== Numeric literals =====

    fn sign_len(&self) -> usize {
        usize::from(self.peek() == Some('-'))
    }

    /// Length of `digit (digit | '_')*` at `offset`, zero if absent.
    fn digit_run(&self, offset: usize, is_digit: fn(char) -> bool) -> usize {
        if !self.peek_ahead(offset).is_some_and(is_digit) {
            return 0;
        }
        let mut len = 1;
        while self
            .peek_ahead(offset + len)
            .is_some_and(|ch| is_digit(ch) || ch == '_')
        {
            len += 1;
        }
        len
    }

    /// `-? 0<marker> digits`, returning the total length.
    fn prefixed_integer(&self, marker: char, is_digit: fn(char) -> bool) -> Option<usize> {
        let sign = self.sign_len();
        if self.peek_ahead(sign) != Some('0') || self.peek_ahead(sign + 1) != Some(marker) {
            return None;
        }
        let digits = self.digit_run(sign + 2, is_digit);
        (digits > 0).then_some(sign + 2 + digits)
    }

    /// `. digits` at `offset`, zero if absent.
    fn fraction(&self, offset: usize, is_digit: fn(char) -> bool) -> usize {
        if self.peek_ahead(offset) != Some('.') {
            return 0;
        }
        match self.digit_run(offset + 1, is_digit) {
            0 => 0,
            digits => 1 + digits,
        }
    }

    /// `<marker> [+-]? decimal-digits` at `offset`, zero if absent.
    fn exponent(&self, offset: usize, markers: [char; 2]) -> usize {
        if !self
            .peek_ahead(offset)
            .is_some_and(|ch| markers.contains(&ch))
        {
            return 0;
        }
        let mut len = 1;
        if matches!(self.peek_ahead(offset + 1), Some('+' | '-')) {
            len += 1;
        }
        match self.digit_run(offset + len, is_decimal_digit) {
            0 => 0,
            digits => len + digits,
        }
    }

    fn number(&self, len: usize, make: fn(String) -> Literal) -> Scanned {
        Scanned {
            kind: TokenKind::Literal(make(self.slice(0, len))),
            len,
        }
    }

    fn hex_float(&self) -> Option<Scanned> {
        let mantissa = self.prefixed_integer('x', is_hex_digit)?;
        let fraction = self.fraction(mantissa, is_hex_digit);
        match self.exponent(mantissa + fraction, ['p', 'P']) {
            0 => None,
            exponent => Some(self.number(
                mantissa + fraction + exponent,
                Literal::HexadecimalFloat,
            )),
        }
    }

    fn hex_integer(&self) -> Option<Scanned> {
        let len = self.prefixed_integer('x', is_hex_digit)?;
        Some(self.number(len, Literal::HexadecimalInteger))
    }

    fn binary_integer(&self) -> Option<Scanned> {
        let len = self.prefixed_integer('b', is_binary_digit)?;
        Some(self.number(len, Literal::BinaryInteger))
    }

    fn octal_integer(&self) -> Option<Scanned> {
        let len = self.prefixed_integer('o', is_octal_digit)?;
        Some(self.number(len, Literal::OctalInteger))
    }

    fn decimal_float(&self) -> Option<Scanned> {
        let sign = self.sign_len();
        let integer = self.digit_run(sign, is_decimal_digit);
        if integer == 0 {
            return None;
        }
        let fraction = self.fraction(sign + integer, is_decimal_digit);
        let exponent = self.exponent(sign + integer + fraction, ['e', 'E']);
        if fraction + exponent == 0 {
            return None;
        }
        Some(self.number(
            sign + integer + fraction + exponent,
            Literal::DecimalFloat,
        ))
    }

    fn decimal_integer(&self) -> Option<Scanned> {
        let sign = self.sign_len();
        match self.digit_run(sign, is_decimal_digit) {
            0 => None,
            digits => Some(self.number(sign + digits, Literal::DecimalInteger)),
        }
    }

    // ===== Identifiers and keywords =====

    /// Length of the identifier word starting at `offset`.
    fn word_len(&self, offset: usize) -> usize {
        if !self.peek_ahead(offset).is_some_and(is_identifier_head) {
            return 0;
        }
        let mut len = 1;
        while self.peek_ahead(offset + len).is_some_and(is_identifier_char) {
            len += 1;
        }
        len
    }

    /// `word` at the cursor, not followed by another identifier character.
    fn matches_word(&self, word: &str) -> bool {
        let mut len = 0;
        for expected in word.chars() {
            if self.peek_ahead(len) != Some(expected) {
                return false;
            }
            len += 1;
        }
        !self.peek_ahead(len).is_some_and(is_identifier_char)
    }

    fn literal_word(&self) -> Option<Scanned> {
        [
            ("true", Literal::True),
            ("false", Literal::False),
            ("nil", Literal::Nil),
        ]
        .into_iter()
        .find(|(word, _)| self.matches_word(word))
        .map(|(word, literal)| Scanned {
            kind: TokenKind::Literal(literal),
            len: word.len(),
        })
    }

    /// The word is read to its end before lookup, so a keyword that is only
    /// a prefix (`enum` in `enumerate`) never matches.
    fn keyword(&self) -> Option<Scanned> {
        let len = self.word_len(0);
        if len == 0 {
            return None;
        }
        let keyword = lookup_keyword(&self.slice(0, len))?;
        Some(Scanned {
            kind: TokenKind::Keyword(keyword),
            len,
        })
    }

    fn backtick_identifier(&self) -> Option<Scanned> {
        if self.peek() != Some('`') {
            return None;
        }
        let len = self.word_len(1);
        if len == 0 || self.peek_ahead(1 + len) != Some('`') {
            return None;
        }
        Some(Scanned {
            kind: TokenKind::BacktickIdentifier(self.slice(1, 1 + len)),
            len: len + 2,
        })
    }

    /// `$0`, `$1`, ...
    fn implicit_parameter(&self) -> Option<Scanned> {
        if self.peek() != Some('$') {
            return None;
        }
        match self.digit_run(1, is_decimal_digit) {
            0 => None,
            digits => Some(Scanned {
                kind: TokenKind::Identifier(self.slice(0, 1 + digits)),
                len: 1 + digits,
            }),
        }
    }

    fn identifier(&self) -> Option<Scanned> {
        match self.word_len(0) {
            0 => None,
            len => Some(Scanned {
                kind: TokenKind::Identifier(self.slice(0, len)),
                len,
            }),
        }
    }

    // ===== Comments =====

    fn line_comment(&self) -> Option<Scanned> {
        if self.peek() != Some('/') || self.peek_ahead(1) != Some('/') {
            return None;
        }
        let mut len = 2;
        while self
            .peek_ahead(len)
            .is_some_and(|ch| !matches!(ch, '\n' | '\r'))
        {
            len += 1;
        }
        Some(Scanned {
            kind: TokenKind::Comment(self.slice(0, len)),
            len,
        })
    }

    /// `/* ... */` with nesting. An unterminated comment runs to end of input.
    fn block_comment(&self) -> Option<Scanned> {
        if self.peek() != Some('/') || self.peek_ahead(1) != Some('*') {
            return None;
        }

        let mut depth = 0usize;
        let mut len = 0;
        loop {
            match (self.peek_ahead(len), self.peek_ahead(len + 1)) {
                (Some('/'), Some('*')) => {
                    depth += 1;
                    len += 2;
                }
                (Some('*'), Some('/')) => {
                    depth -= 1;
                    len += 2;
                    if depth == 0 {
                        break;
                    }
                }
                (Some(_), _) => len += 1,
                (None, _) => break,
            }
        }

        Some(Scanned {
            kind: TokenKind::Comment(self.slice(0, len)),
            len,
        })
    }

    // ===== Punctuation and operators =====

    fn arrow(&self) -> Option<Scanned> {
        (self.peek() == Some('-') && self.peek_ahead(1) == Some('>')).then_some(Scanned {
            kind: TokenKind::Punctuator(Punctuator::Arrow),
            len: 2,
        })
    }

    /// `..`-prefixed operators such as `...` and `..<`
    fn dot_operator(&self) -> Option<Scanned> {
        if self.peek() != Some('.') || self.peek_ahead(1) != Some('.') {
            return None;
        }
        let mut len = 2;
        while self
            .peek_ahead(len)
            .is_some_and(|ch| ch == '.' || is_operator_char(ch))
            && !self.starts_comment(len)
        {
            len += 1;
        }
        Some(Scanned {
            kind: TokenKind::Operator(self.slice(0, len)),
            len,
        })
    }

    fn delimiter(&self) -> Option<Scanned> {
        let punctuator = Punctuator::from_delimiter(self.peek()?)?;
        Some(Scanned {
            kind: TokenKind::Punctuator(punctuator),
            len: 1,
        })
    }

    /// Greedy run of operator characters. A lone `=`, `!`, `&` or `?` is
    /// re-tagged as its dedicated punctuator.
    fn operator_run(&self) -> Option<Scanned> {
        let mut len = 0;
        while self.peek_ahead(len).is_some_and(is_operator_char) && !self.starts_comment(len) {
            len += 1;
        }
        if len == 0 {
            return None;
        }

        let text = self.slice(0, len);
        let kind = match Punctuator::from_operator(&text) {
            Some(punctuator) => TokenKind::Punctuator(punctuator),
            None => TokenKind::Operator(text),
        };
        Some(Scanned { kind, len })
    }

    fn starts_comment(&self, offset: usize) -> bool {
        self.peek_ahead(offset) == Some('/') && matches!(self.peek_ahead(offset + 1), Some('/' | '*'))
    }

    // ===== Whitespace and control characters =====

    fn control(&self) -> Option<Scanned> {
        let control = Control::from_char(self.peek()?)?;
        Some(Scanned {
            kind: TokenKind::Control(control),
            len: 1,
        })
    }

    // ===== Cursor =====

    fn slice(&self, from: usize, to: usize) -> String {
        self.input[self.position + from..self.position + to]
            .iter()
            .collect()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.peek_ahead(0)
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character. `\r\n` moves to the next line once, at the `\n`.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        match ch {
            '\n' => self.new_line(),
            '\r' if self.peek() != Some('\n') => self.new_line(),
            _ => self.column += ch.len_utf16(),
        }

        Some(ch)
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.path.clone(), self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::{ContextualKind, KeywordCategory};

    fn tokenize(source: &str) -> LexicalContext {
        lex(&SourceUnit::new("test.swift", source))
    }

    fn significant_kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .significant()
            .map(|token| token.kind.clone())
            .collect()
    }

    fn single(source: &str) -> TokenKind {
        let context = tokenize(source);
        assert_eq!(context.len(), 1, "expected one token for {:?}", source);
        context.tokens()[0].kind.clone()
    }

    #[test]
    fn test_simple_tokens() {
        let kinds = significant_kinds("enum foo { case A }");

        assert!(matches!(&kinds[0], TokenKind::Keyword(k) if k.text == "enum"));
        assert!(matches!(&kinds[1], TokenKind::Identifier(s) if s == "foo"));
        assert_eq!(kinds[2], TokenKind::Punctuator(Punctuator::LeftBrace));
        assert!(matches!(&kinds[3], TokenKind::Keyword(k) if k.text == "case"));
        assert!(matches!(&kinds[4], TokenKind::Identifier(s) if s == "A"));
        assert_eq!(kinds[5], TokenKind::Punctuator(Punctuator::RightBrace));
        assert_eq!(kinds.len(), 6);
    }

    #[test]
    fn test_literal_words_respect_word_boundary() {
        assert_eq!(single("true"), TokenKind::Literal(Literal::True));
        assert_eq!(single("false"), TokenKind::Literal(Literal::False));
        assert_eq!(single("nil"), TokenKind::Literal(Literal::Nil));
        assert_eq!(single("trueish"), TokenKind::Identifier("trueish".into()));
        assert_eq!(single("nil_value"), TokenKind::Identifier("nil_value".into()));
    }

    #[test]
    fn test_keywords_respect_word_boundary() {
        assert_eq!(single("enumerate"), TokenKind::Identifier("enumerate".into()));
        assert_eq!(single("_x"), TokenKind::Identifier("_x".into()));
        assert!(matches!(
            single("_"),
            TokenKind::Keyword(k) if k.category == KeywordCategory::Pattern
        ));
        assert!(matches!(
            single("set"),
            TokenKind::Keyword(k)
                if k.category == KeywordCategory::Contextual(ContextualKind::Accessor)
        ));
    }

    #[test]
    fn test_numeric_literal_priority() {
        assert_eq!(
            single("0x1.8p3"),
            TokenKind::Literal(Literal::HexadecimalFloat("0x1.8p3".into()))
        );
        assert_eq!(
            single("0xFFp-2"),
            TokenKind::Literal(Literal::HexadecimalFloat("0xFFp-2".into()))
        );
        assert_eq!(
            single("0xdead_beef"),
            TokenKind::Literal(Literal::HexadecimalInteger("0xdead_beef".into()))
        );
        assert_eq!(
            single("0b1010"),
            TokenKind::Literal(Literal::BinaryInteger("0b1010".into()))
        );
        assert_eq!(
            single("0o755"),
            TokenKind::Literal(Literal::OctalInteger("0o755".into()))
        );
        assert_eq!(
            single("1_000.5e-3"),
            TokenKind::Literal(Literal::DecimalFloat("1_000.5e-3".into()))
        );
        assert_eq!(
            single("2E10"),
            TokenKind::Literal(Literal::DecimalFloat("2E10".into()))
        );
        assert_eq!(
            single("1_000"),
            TokenKind::Literal(Literal::DecimalInteger("1_000".into()))
        );
        assert_eq!(
            single("-42"),
            TokenKind::Literal(Literal::DecimalInteger("-42".into()))
        );
    }

    #[test]
    fn test_incomplete_numeric_forms_fall_back() {
        // `0x` without digits is a decimal zero followed by an identifier
        assert_eq!(
            significant_kinds("0x"),
            vec![
                TokenKind::Literal(Literal::DecimalInteger("0".into())),
                TokenKind::Identifier("x".into()),
            ]
        );
        // a range operator is not a fraction
        assert_eq!(
            significant_kinds("1..<2"),
            vec![
                TokenKind::Literal(Literal::DecimalInteger("1".into())),
                TokenKind::Operator("..<".into()),
                TokenKind::Literal(Literal::DecimalInteger("2".into())),
            ]
        );
    }

    #[test]
    fn test_operators_and_punctuators() {
        assert_eq!(
            significant_kinds("= == ! != & && ? ?? -> + a.b"),
            vec![
                TokenKind::Punctuator(Punctuator::Equal),
                TokenKind::Operator("==".into()),
                TokenKind::Punctuator(Punctuator::Exclaim),
                TokenKind::Operator("!=".into()),
                TokenKind::Punctuator(Punctuator::Amp),
                TokenKind::Operator("&&".into()),
                TokenKind::Punctuator(Punctuator::Question),
                TokenKind::Operator("??".into()),
                TokenKind::Punctuator(Punctuator::Arrow),
                TokenKind::Operator("+".into()),
                TokenKind::Identifier("a".into()),
                TokenKind::Punctuator(Punctuator::Period),
                TokenKind::Identifier("b".into()),
            ]
        );
    }

    #[test]
    fn test_operator_run_stops_at_comment() {
        let kinds = significant_kinds("a +// note");
        assert_eq!(kinds[1], TokenKind::Operator("+".into()));
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(
            single(r#""hello\"world""#),
            TokenKind::Literal(Literal::StaticString(r#"hello\"world"#.into()))
        );
        assert_eq!(
            single(r#""sum: \(add(1, (2)))!""#),
            TokenKind::Literal(Literal::InterpolatedString(r#"sum: \(add(1, (2)))!"#.into()))
        );
        // an escaped backslash does not open an interpolation
        assert_eq!(
            single(r#""a\\(b""#),
            TokenKind::Literal(Literal::StaticString(r#"a\\(b"#.into()))
        );
    }

    #[test]
    fn test_unterminated_string_degrades_to_invalid() {
        let kinds = significant_kinds("\"abc\nx");
        assert_eq!(kinds[0], TokenKind::Invalid("\"".into()));
        assert_eq!(kinds[1], TokenKind::Identifier("abc".into()));
        assert_eq!(kinds[2], TokenKind::Identifier("x".into()));
    }

    #[test]
    fn test_backtick_and_implicit_identifiers() {
        assert_eq!(
            single("`class`"),
            TokenKind::BacktickIdentifier("class".into())
        );
        assert_eq!(single("$0"), TokenKind::Identifier("$0".into()));
        assert_eq!(single("`"), TokenKind::Punctuator(Punctuator::Backtick));
        assert_eq!(
            significant_kinds("`abc")[0],
            TokenKind::Invalid("`".into())
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            significant_kinds("a // trailing\nb"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Identifier("b".into()),
            ]
        );
        let context = tokenize("/* outer /* inner */ still */x");
        assert_eq!(
            context.tokens()[0].kind,
            TokenKind::Comment("/* outer /* inner */ still */".into())
        );
        assert_eq!(context.tokens()[1].kind, TokenKind::Identifier("x".into()));
    }

    #[test]
    fn test_unterminated_nested_comment_runs_to_end() {
        let source = "/* a /* b */ c";
        assert_eq!(single(source), TokenKind::Comment(source.into()));
    }

    #[test]
    fn test_control_tokens_and_invalid() {
        let context = tokenize(" \t\u{0C}\0§");
        let kinds: Vec<_> = context.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Control(Control::Space),
                TokenKind::Control(Control::HorizontalTab),
                TokenKind::Control(Control::FormFeed),
                TokenKind::Control(Control::Null),
                TokenKind::Invalid("§".into()),
            ]
        );
    }

    #[test]
    fn test_crlf_advances_line_once() {
        let context = tokenize("a\r\nb");
        let ranges: Vec<_> = context.iter().map(|t| t.range.describe()).collect();
        assert_eq!(
            ranges,
            vec![
                "test.swift[1:1-1:2]",
                "test.swift[1:2-1:3]",
                "test.swift[1:3-2:1]",
                "test.swift[2:1-2:2]",
            ]
        );
        assert_eq!(context.tokens()[1].kind, TokenKind::Control(Control::CarriageReturn));
        assert_eq!(context.tokens()[2].kind, TokenKind::Control(Control::LineFeed));
    }

    #[test]
    fn test_lone_carriage_return_is_a_newline() {
        let context = tokenize("a\rb");
        assert_eq!(context.tokens()[2].range.describe(), "test.swift[2:1-2:2]");
    }

    #[test]
    fn test_columns_count_utf16_units() {
        let context = tokenize("\"😀\" é");
        let ranges: Vec<_> = context.iter().map(|t| t.range.describe()).collect();
        assert_eq!(
            ranges,
            vec![
                "test.swift[1:1-1:5]",
                "test.swift[1:5-1:6]",
                "test.swift[1:6-1:7]",
            ]
        );
    }

    #[test]
    fn test_round_trip() {
        let source = "@x public(set) enum `E` {\r\n\tcase a, b // c\n/* /* */ */ }\"s\\(1)\" -1 §";
        assert_eq!(tokenize(source).source_text(), source);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }
}
