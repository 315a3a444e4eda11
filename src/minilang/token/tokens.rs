//! Data types representing the tokens of the language.
use core::fmt::{Display, Formatter};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::minilang::types::Location;

/// Keywords of the language.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[expect(
    clippy::exhaustive_enums,
    reason = "adding a keyword changes the language and MUST be handled."
)]
pub enum Keyword {
    // Declarations
    /// `"var"`
    Var,
    /// `"function"`
    Function,

    // Control flow
    /// `"if"`
    If,
    /// `"else"`
    Else,
    /// `"while"`
    While,
}

impl Keyword {
    /// Every keyword, in declaration order.
    pub const ALL: [Keyword; 5] = [
        Keyword::Var,
        Keyword::Function,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
    ];

    /// Extract the raw representation as it occurs in the source code.
    #[must_use]
    pub const fn to_raw(self) -> &'static str {
        match self {
            Keyword::Var => "var",
            Keyword::Function => "function",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
        }
    }

    /// Tag used when dumping tokens.
    const fn name(self) -> &'static str {
        match self {
            Keyword::Var => "VAR",
            Keyword::Function => "FUNCTION",
            Keyword::If => "IF",
            Keyword::Else => "ELSE",
            Keyword::While => "WHILE",
        }
    }
}

/// Lookup table for keywords to distinguish them from identifiers.
/// Built once on first use and never mutated afterwards.
pub static KEYWORDS: LazyLock<HashMap<&'static str, Keyword>> =
    LazyLock::new(|| Keyword::ALL.iter().map(|kw| (kw.to_raw(), *kw)).collect());

/// The kind of a token.
///
/// The exact source text is kept on the [`Token`] itself, so even
/// literals and identifiers need no payload here.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[expect(
    clippy::exhaustive_enums,
    reason = "adding a new variant MUST be handled and is a breaking change."
)]
pub enum TokenKind {
    // Literals and names
    /// A run of decimal digits.
    IntegerLiteral,
    /// A name that is not a keyword.
    Identifier,
    /// A specific keyword.
    Keyword(Keyword),

    // Arith Operators
    /// `"+"`
    Plus,
    /// `"-"`
    Minus,
    /// `"*"`
    Times,
    /// `"/"`
    Divide,

    // Grouping and separators
    /// `"("`
    LeftParen,
    /// `")"`
    RightParen,
    /// `";"`
    Semicolon,

    // Logical Operators
    /// `"&&"`
    DoubleAmpersand,
    /// `"||"`
    DoublePipe,
    /// `"!"`
    Exclamation,

    // Assignment and comparison
    /// `"="`
    Equal,
    /// `"=="`
    DoubleEqual,
    /// `"!="`
    NotEqual,
    /// `"<"`
    Less,
    /// `"<="`
    LessEqual,
    /// `">"`
    Greater,
    /// `">="`
    GreaterEqual,
}

impl TokenKind {
    /// Upper-case tag naming the kind, as printed in token dumps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::IntegerLiteral => "INTEGER_LITERAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Keyword(kw) => kw.name(),
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Divide => "DIVIDE",
            TokenKind::LeftParen => "LPAREN",
            TokenKind::RightParen => "RPAREN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::DoubleAmpersand => "DOUBLE_AMPERSAND",
            TokenKind::DoublePipe => "DOUBLE_PIPE",
            TokenKind::Exclamation => "EXCLAMATION",
            TokenKind::Equal => "EQUAL",
            TokenKind::DoubleEqual => "DOUBLE_EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
        }
    }
}

/// A single token: its kind, the exact lexeme, and where it started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Kind of this token.
    kind: TokenKind,
    /// The source text making up this token.
    lexeme: String,
    /// Location of the first character of the token.
    location: Location,
}

impl Token {
    /// Bundle a kind, lexeme and location into a token.
    #[must_use]
    pub const fn new(kind: TokenKind, lexeme: String, location: Location) -> Self {
        Token {
            kind,
            lexeme,
            location,
        }
    }

    /// Kind of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The source text making up this token.
    #[must_use]
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Location of the first character of the token.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}:{} {} {}",
            self.location.line(),
            self.location.col(),
            self.kind.name(),
            self.lexeme
        )
    }
}
