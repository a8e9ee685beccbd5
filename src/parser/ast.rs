//! AST (Abstract Syntax Tree) definitions
//!
//! Nodes are plain values built by the parser once a production completes.
//! Each carries the [`SourceRange`] from its first consumed token to its last.
//! `Display` renders the grammar-faithful text description of a node.

use super::source::SourceRange;
use std::fmt;

/// Declaration-level access modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessLevel {
    /// No modifier, or a malformed one that was rejected
    #[default]
    Default,
    Public,
    Internal,
    Private,
}

impl AccessLevel {
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text {
            "public" => Some(AccessLevel::Public),
            "internal" => Some(AccessLevel::Internal),
            "private" => Some(AccessLevel::Private),
            _ => None,
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessLevel::Default => Ok(()),
            AccessLevel::Public => write!(f, "public"),
            AccessLevel::Internal => write!(f, "internal"),
            AccessLevel::Private => write!(f, "private"),
        }
    }
}

/// `@name` with an optional verbatim argument clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Balanced `( ... )` clause exactly as written, parentheses included
    pub arguments: Option<String>,
    pub range: SourceRange,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if let Some(arguments) = &self.arguments {
            f.write_str(arguments)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumElement {
    pub name: String,
    pub range: SourceRange,
}

impl fmt::Display for EnumElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One `case` clause; never empty once parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCase {
    pub elements: Vec<EnumElement>,
    pub range: SourceRange,
}

impl fmt::Display for EnumCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "case ")?;
        write_joined(f, &self.elements, ", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDeclaration {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub access_level: AccessLevel,
    pub cases: Vec<EnumCase>,
    pub range: SourceRange,
}

impl EnumDeclaration {
    /// Every case's elements, flattened in source order.
    pub fn elements(&self) -> impl Iterator<Item = &EnumElement> + '_ {
        self.cases.iter().flat_map(|case| case.elements.iter())
    }
}

impl fmt::Display for EnumDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, &self.attributes, self.access_level)?;
        write!(f, "enum {} {{", self.name)?;
        if self.cases.is_empty() {
            return write!(f, "}}");
        }
        writeln!(f)?;
        for case in &self.cases {
            writeln!(f, "{}", case)?;
        }
        write!(f, "}}")
    }
}

/// `import A.B.C`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub attributes: Vec<Attribute>,
    pub access_level: AccessLevel,
    pub path: Vec<String>,
    pub range: SourceRange,
}

impl ImportDeclaration {
    /// Dotted module path
    pub fn name(&self) -> String {
        self.path.join(".")
    }
}

impl fmt::Display for ImportDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, &self.attributes, self.access_level)?;
        write!(f, "import {}", self.name())
    }
}

/// Any declaration the parser produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Enum(EnumDeclaration),
    Import(ImportDeclaration),
}

impl Declaration {
    pub fn name(&self) -> String {
        match self {
            Declaration::Enum(decl) => decl.name.clone(),
            Declaration::Import(decl) => decl.name(),
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Declaration::Enum(decl) => &decl.attributes,
            Declaration::Import(decl) => &decl.attributes,
        }
    }

    pub fn access_level(&self) -> AccessLevel {
        match self {
            Declaration::Enum(decl) => decl.access_level,
            Declaration::Import(decl) => decl.access_level,
        }
    }

    pub fn range(&self) -> &SourceRange {
        match self {
            Declaration::Enum(decl) => &decl.range,
            Declaration::Import(decl) => &decl.range,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDeclaration> {
        match self {
            Declaration::Enum(decl) => Some(decl),
            _ => None,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::Enum(decl) => fmt::Display::fmt(decl, f),
            Declaration::Import(decl) => fmt::Display::fmt(decl, f),
        }
    }
}

/// Top-level statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Declaration(Declaration),
}

impl Statement {
    pub fn range(&self) -> &SourceRange {
        match self {
            Statement::Declaration(decl) => decl.range(),
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Statement::Declaration(decl) => Some(decl),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Declaration(decl) => fmt::Display::fmt(decl, f),
        }
    }
}

/// Root of one parsed source unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopLevelDeclaration {
    pub statements: Vec<Statement>,
}

impl TopLevelDeclaration {
    pub fn new() -> Self {
        TopLevelDeclaration::default()
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.statements.iter().filter_map(Statement::as_declaration)
    }
}

impl fmt::Display for TopLevelDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.statements, "\n")
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], separator: &str) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Attributes and access modifier, each followed by a space
fn write_prefix(f: &mut fmt::Formatter<'_>, attributes: &[Attribute], access_level: AccessLevel) -> fmt::Result {
    for attribute in attributes {
        write!(f, "{} ", attribute)?;
    }
    if access_level != AccessLevel::Default {
        write!(f, "{} ", access_level)?;
    }
    Ok(())
}
