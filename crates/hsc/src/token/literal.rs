//! Classification of completed identifier-class runs

use super::TokenKind;
use logos::Logos;

/// Shapes a bare run of identifier characters can take when it is a literal
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum LiteralShape {
    #[token("true")]
    #[token("false")]
    Bool,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]*\.[0-9]+")]
    Decimal,
}

impl From<LiteralShape> for TokenKind {
    fn from(shape: LiteralShape) -> Self {
        match shape {
            LiteralShape::Bool => TokenKind::Bool,
            LiteralShape::Integer => TokenKind::Integer,
            LiteralShape::Decimal => TokenKind::Decimal,
        }
    }
}

/// Classify a completed run of identifier characters.
///
/// `true`/`false` are booleans, one or more digits is an integer, and
/// optional digits, one `.`, then one or more digits is a decimal. Anything
/// else, including malformed numbers such as `1.2.3`, `1.` or `12abc`, is an
/// identifier.
pub fn classify_literal(text: &str) -> TokenKind {
    let mut lexer = LiteralShape::lexer(text);
    match lexer.next() {
        Some(Ok(shape)) if lexer.span() == (0..text.len()) => shape.into(),
        _ => TokenKind::Identifier,
    }
}
