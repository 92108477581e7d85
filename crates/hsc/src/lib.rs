//! hsc - lexical front end for a parenthesized, Lisp-like surface syntax
//!
//! Converts a character stream into positioned tokens for a downstream
//! parser. Whitespace and comments are kept as tokens, so concatenating the
//! text of every token reproduces the input.
//!
//! ## Architecture
//!
//! - **Token** (`token/`): token kinds, positions, character and literal
//!   classification
//! - **Scan** (`scan/`): character cursor, state machine, and the scanner
//!   that emits tokens into a sink or over a channel
//! - **Common** (`common/`): errors and diagnostic rendering
//! - **Config** (`config`): scan options
//!
//! ```
//! use hsc::{TokenKind, tokenize};
//!
//! let tokens = tokenize("(+ 1 2.5)").unwrap();
//! assert_eq!(tokens[1].kind, TokenKind::Identifier);
//! assert_eq!(tokens[3].kind, TokenKind::Integer);
//! assert_eq!(tokens[5].kind, TokenKind::Decimal);
//! assert!(tokens.last().unwrap().is_eof());
//! ```

pub mod common;
pub mod config;
pub mod scan;
pub mod token;

// Re-exports for convenience
pub use common::{DiagnosticReporter, ScanError, ScanResult};
pub use config::{CancelToken, ScanConfig};
pub use scan::{Scanner, TokenSink, TokenStream, spawn, tokenize};
pub use token::{Position, Token, TokenKind, classify_char, classify_literal};
