//! Token model: kinds, positions and character classification

mod kind;
mod literal;
mod position;

pub use kind::{
    Token, TokenKind, classify_char, is_digit, is_identifier_char, is_symbol, is_whitespace,
};
pub use literal::classify_literal;
pub use position::Position;
