//! Token kinds and single-character classification

use super::Position;
use std::fmt;

/// Token with source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text covered by the token. Error tokens carry their
    /// diagnostic message here, and the end-of-stream token is empty.
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn eof(position: Position) -> Self {
        Self::new(TokenKind::Eof, String::new(), position)
    }

    pub fn error(message: impl Into<String>, position: Position) -> Self {
        Self::new(TokenKind::Error, message, position)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.position, self.kind, self.text)
    }
}

/// All token kinds.
///
/// Declaration order matters: the literal kinds are contiguous so that
/// [`TokenKind::is_literal`] can test a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Eof,
    Error,

    Whitespace,
    Comment,

    // === Literals ===
    String,
    Integer,
    Decimal,
    Bool,

    OpenParen,
    CloseParen,
    Identifier,
}

impl TokenKind {
    /// Check if this kind is one of the literal kinds
    pub fn is_literal(&self) -> bool {
        (TokenKind::String..=TokenKind::Bool).contains(self)
    }

    /// The kind's own structural character, e.g. `(` for `OpenParen`.
    ///
    /// This is not the matching counterpart: `CloseParen` gives `)`.
    pub fn delimiter_char(&self) -> Option<char> {
        match self {
            TokenKind::OpenParen => Some('('),
            TokenKind::CloseParen => Some(')'),
            TokenKind::Comment => Some(';'),
            _ => None,
        }
    }

    /// Stable name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Error => "Error",
            TokenKind::Whitespace => "Whitespace",
            TokenKind::Comment => "Comment",
            TokenKind::String => "String",
            TokenKind::Integer => "Integer",
            TokenKind::Decimal => "Decimal",
            TokenKind::Bool => "Bool",
            TokenKind::OpenParen => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
            TokenKind::Identifier => "Identifier",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a single character by its structural meaning.
///
/// Anything that is not a paren, comment marker or whitespace maps to
/// [`TokenKind::Error`], meaning "not a structural delimiter".
pub fn classify_char(c: char) -> TokenKind {
    match c {
        '(' => TokenKind::OpenParen,
        ')' => TokenKind::CloseParen,
        ';' => TokenKind::Comment,
        ' ' | '\t' | '\r' | '\n' => TokenKind::Whitespace,
        _ => TokenKind::Error,
    }
}

pub fn is_whitespace(c: char) -> bool {
    classify_char(c) == TokenKind::Whitespace
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Printable ASCII punctuation in `'!'..='/'`, minus the double quote
/// (reserved for strings) and the structural characters.
pub fn is_symbol(c: char) -> bool {
    if c == '"' || classify_char(c) != TokenKind::Error {
        return false;
    }
    ('!'..='/').contains(&c)
}

/// Characters that may appear in an identifier or bare literal
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_symbol(c)
}
