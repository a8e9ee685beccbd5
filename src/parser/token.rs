//! Token model
//!
//! Every [`Token`] pairs a [`TokenKind`] with the [`SourceRange`] it was read
//! from. Kinds keep enough of the original spelling that
//! [`Token::source_text`] reproduces the input exactly, trivia included.

use super::source::SourceRange;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

/// Literal tokens. Numeric and string variants keep their raw spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Raw text between the quotes, no interpolation
    StaticString(String),
    /// Raw text between the quotes, containing at least one `\(`
    InterpolatedString(String),
    BinaryInteger(String),
    OctalInteger(String),
    DecimalInteger(String),
    HexadecimalInteger(String),
    DecimalFloat(String),
    HexadecimalFloat(String),
    True,
    False,
    Nil,
}

/// Subcategory of a context-sensitive keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextualKind {
    Accessor,      // get set willSet didSet
    Associativity, // associativity left right none
    Mutation,      // mutating nonmutating
    Modifier,      // final lazy weak ...
    Operator,      // infix prefix postfix precedence
    Type,          // Type Protocol
}

/// Syntactic category of a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    Statement,
    Expression,
    Pattern,
    Contextual(ContextualKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keyword {
    pub text: &'static str,
    pub category: KeywordCategory,
}

impl Keyword {
    pub fn is_contextual(&self) -> bool {
        matches!(self.category, KeywordCategory::Contextual(_))
    }
}

const DECLARATION_KEYWORDS: &[&str] = &[
    "associatedtype",
    "class",
    "deinit",
    "enum",
    "extension",
    "fileprivate",
    "func",
    "import",
    "init",
    "inout",
    "internal",
    "let",
    "open",
    "operator",
    "private",
    "protocol",
    "public",
    "rethrows",
    "static",
    "struct",
    "subscript",
    "typealias",
    "var",
];

const STATEMENT_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "continue",
    "default",
    "defer",
    "do",
    "else",
    "fallthrough",
    "for",
    "guard",
    "if",
    "in",
    "repeat",
    "return",
    "switch",
    "where",
    "while",
];

const EXPRESSION_KEYWORDS: &[&str] = &[
    "as", "Any", "catch", "is", "super", "self", "Self", "throw", "throws", "try",
];

const PATTERN_KEYWORDS: &[&str] = &["_"];

const CONTEXTUAL_KEYWORDS: &[(ContextualKind, &[&str])] = &[
    (ContextualKind::Accessor, &["get", "set", "willSet", "didSet"]),
    (
        ContextualKind::Associativity,
        &["associativity", "left", "right", "none"],
    ),
    (ContextualKind::Mutation, &["mutating", "nonmutating"]),
    (
        ContextualKind::Modifier,
        &[
            "convenience",
            "dynamic",
            "final",
            "indirect",
            "lazy",
            "optional",
            "override",
            "required",
            "unowned",
            "weak",
        ],
    ),
    (
        ContextualKind::Operator,
        &["infix", "postfix", "precedence", "prefix"],
    ),
    (ContextualKind::Type, &["Type", "Protocol"]),
];

fn keyword_table() -> &'static FxHashMap<&'static str, KeywordCategory> {
    static TABLE: OnceLock<FxHashMap<&'static str, KeywordCategory>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = FxHashMap::default();
        let plain = [
            (KeywordCategory::Declaration, DECLARATION_KEYWORDS),
            (KeywordCategory::Statement, STATEMENT_KEYWORDS),
            (KeywordCategory::Expression, EXPRESSION_KEYWORDS),
            (KeywordCategory::Pattern, PATTERN_KEYWORDS),
        ];
        for (category, words) in plain {
            for word in words {
                table.insert(*word, category);
            }
        }
        for (kind, words) in CONTEXTUAL_KEYWORDS {
            for word in *words {
                table.insert(*word, KeywordCategory::Contextual(*kind));
            }
        }
        table
    })
}

/// Look up a complete word in the keyword table.
pub fn lookup_keyword(word: &str) -> Option<Keyword> {
    keyword_table()
        .get_key_value(word)
        .map(|(text, category)| Keyword {
            text: *text,
            category: *category,
        })
}

/// Closed set of grammar-significant punctuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuator {
    LeftParen,   // (
    RightParen,  // )
    LeftBrace,   // {
    RightBrace,  // }
    LeftSquare,  // [
    RightSquare, // ]
    Period,      // .
    Comma,       // ,
    Colon,       // :
    Semicolon,   // ;
    Equal,       // =
    At,          // @
    Pound,       // #
    Amp,         // &
    Arrow,       // ->
    Backtick,    // `
    Exclaim,     // !
    Question,    // ?
}

impl Punctuator {
    pub fn as_str(self) -> &'static str {
        match self {
            Punctuator::LeftParen => "(",
            Punctuator::RightParen => ")",
            Punctuator::LeftBrace => "{",
            Punctuator::RightBrace => "}",
            Punctuator::LeftSquare => "[",
            Punctuator::RightSquare => "]",
            Punctuator::Period => ".",
            Punctuator::Comma => ",",
            Punctuator::Colon => ":",
            Punctuator::Semicolon => ";",
            Punctuator::Equal => "=",
            Punctuator::At => "@",
            Punctuator::Pound => "#",
            Punctuator::Amp => "&",
            Punctuator::Arrow => "->",
            Punctuator::Backtick => "`",
            Punctuator::Exclaim => "!",
            Punctuator::Question => "?",
        }
    }

    /// Single-character punctuators that are never part of an operator run.
    pub fn from_delimiter(ch: char) -> Option<Self> {
        Some(match ch {
            '(' => Punctuator::LeftParen,
            ')' => Punctuator::RightParen,
            '{' => Punctuator::LeftBrace,
            '}' => Punctuator::RightBrace,
            '[' => Punctuator::LeftSquare,
            ']' => Punctuator::RightSquare,
            '.' => Punctuator::Period,
            ',' => Punctuator::Comma,
            ':' => Punctuator::Colon,
            ';' => Punctuator::Semicolon,
            '@' => Punctuator::At,
            '#' => Punctuator::Pound,
            '`' => Punctuator::Backtick,
            _ => return None,
        })
    }

    /// Operator characters that stand alone as punctuators.
    pub fn from_operator(text: &str) -> Option<Self> {
        Some(match text {
            "=" => Punctuator::Equal,
            "!" => Punctuator::Exclaim,
            "&" => Punctuator::Amp,
            "?" => Punctuator::Question,
            _ => return None,
        })
    }
}

/// Whitespace and control characters, one token per character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    LineFeed,
    CarriageReturn,
    HorizontalTab,
    FormFeed,
    Null,
    Space,
}

impl Control {
    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '\n' => Control::LineFeed,
            '\r' => Control::CarriageReturn,
            '\t' => Control::HorizontalTab,
            '\u{0C}' => Control::FormFeed,
            '\0' => Control::Null,
            ' ' => Control::Space,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Control::LineFeed => '\n',
            Control::CarriageReturn => '\r',
            Control::HorizontalTab => '\t',
            Control::FormFeed => '\u{0C}',
            Control::Null => '\0',
            Control::Space => ' ',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Literal(Literal),
    Identifier(String),
    /// Name without the surrounding backticks
    BacktickIdentifier(String),
    Keyword(Keyword),
    Punctuator(Punctuator),
    Operator(String),
    /// Raw text including delimiters
    Comment(String),
    Control(Control),
    Invalid(String),
}

impl TokenKind {
    /// Exact source spelling of this token.
    pub fn source_text(&self) -> Cow<'_, str> {
        match self {
            TokenKind::Literal(literal) => match literal {
                Literal::StaticString(raw) | Literal::InterpolatedString(raw) => {
                    Cow::Owned(format!("\"{raw}\""))
                }
                Literal::BinaryInteger(raw)
                | Literal::OctalInteger(raw)
                | Literal::DecimalInteger(raw)
                | Literal::HexadecimalInteger(raw)
                | Literal::DecimalFloat(raw)
                | Literal::HexadecimalFloat(raw) => Cow::Borrowed(raw),
                Literal::True => Cow::Borrowed("true"),
                Literal::False => Cow::Borrowed("false"),
                Literal::Nil => Cow::Borrowed("nil"),
            },
            TokenKind::Identifier(name) => Cow::Borrowed(name),
            TokenKind::BacktickIdentifier(name) => Cow::Owned(format!("`{name}`")),
            TokenKind::Keyword(keyword) => Cow::Borrowed(keyword.text),
            TokenKind::Punctuator(punctuator) => Cow::Borrowed(punctuator.as_str()),
            TokenKind::Operator(text) | TokenKind::Comment(text) | TokenKind::Invalid(text) => {
                Cow::Borrowed(text)
            }
            TokenKind::Control(control) => Cow::Owned(control.as_char().to_string()),
        }
    }

    /// Whitespace, control markers and comments.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Control(_) | TokenKind::Comment(_))
    }
}

/// A classified lexical unit and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: SourceRange,
}

impl Token {
    pub fn new(kind: TokenKind, range: SourceRange) -> Self {
        Self { kind, range }
    }

    pub fn source_text(&self) -> Cow<'_, str> {
        self.kind.source_text()
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Literal(Literal::StaticString(raw)) => {
                write!(f, "string literal \"{}\"", raw)
            }
            TokenKind::Literal(Literal::InterpolatedString(raw)) => {
                write!(f, "interpolated string literal \"{}\"", raw)
            }
            TokenKind::Literal(Literal::True | Literal::False) => {
                write!(f, "boolean literal '{}'", self.source_text())
            }
            TokenKind::Literal(Literal::Nil) => write!(f, "'nil'"),
            TokenKind::Literal(Literal::DecimalFloat(raw) | Literal::HexadecimalFloat(raw)) => {
                write!(f, "float literal {}", raw)
            }
            TokenKind::Literal(_) => write!(f, "integer literal {}", self.source_text()),
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::BacktickIdentifier(name) => write!(f, "identifier '`{}`'", name),
            TokenKind::Keyword(keyword) => write!(f, "keyword '{}'", keyword.text),
            TokenKind::Punctuator(punctuator) => write!(f, "'{}'", punctuator.as_str()),
            TokenKind::Operator(text) => write!(f, "operator '{}'", text),
            TokenKind::Comment(_) => write!(f, "comment"),
            TokenKind::Control(control) => write!(f, "{:?}", control),
            TokenKind::Invalid(text) => write!(f, "invalid token {:?}", text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_categories() {
        assert_eq!(
            lookup_keyword("enum").map(|k| k.category),
            Some(KeywordCategory::Declaration)
        );
        assert_eq!(
            lookup_keyword("case").map(|k| k.category),
            Some(KeywordCategory::Statement)
        );
        assert_eq!(
            lookup_keyword("_").map(|k| k.category),
            Some(KeywordCategory::Pattern)
        );
        assert_eq!(
            lookup_keyword("willSet").map(|k| k.category),
            Some(KeywordCategory::Contextual(ContextualKind::Accessor))
        );
        assert_eq!(
            lookup_keyword("mutating").map(|k| k.category),
            Some(KeywordCategory::Contextual(ContextualKind::Mutation))
        );
        assert!(lookup_keyword("enumeration").is_none());
        assert!(lookup_keyword("true").is_none());
    }

    #[test]
    fn test_keyword_sets_are_disjoint() {
        let mut seen = rustc_hash::FxHashSet::default();
        let plain = DECLARATION_KEYWORDS
            .iter()
            .chain(STATEMENT_KEYWORDS)
            .chain(EXPRESSION_KEYWORDS)
            .chain(PATTERN_KEYWORDS);
        let contextual = CONTEXTUAL_KEYWORDS.iter().flat_map(|(_, words)| words.iter());
        for word in plain.chain(contextual) {
            assert!(seen.insert(*word), "keyword '{}' listed twice", word);
        }
        assert_eq!(seen.len(), keyword_table().len());
    }

    #[test]
    fn test_operator_respecialization() {
        assert_eq!(Punctuator::from_operator("="), Some(Punctuator::Equal));
        assert_eq!(Punctuator::from_operator("?"), Some(Punctuator::Question));
        assert_eq!(Punctuator::from_operator("=="), None);
        assert_eq!(Punctuator::from_operator("+"), None);
    }

    #[test]
    fn test_source_text_restores_delimiters() {
        let string = TokenKind::Literal(Literal::InterpolatedString("a \\(b)".to_string()));
        assert_eq!(string.source_text(), "\"a \\(b)\"");
        let ident = TokenKind::BacktickIdentifier("class".to_string());
        assert_eq!(ident.source_text(), "`class`");
        assert_eq!(TokenKind::Control(Control::CarriageReturn).source_text(), "\r");
    }
}
