//! Scanning states and their transitions
//!
//! Every state is a method on [`Machine`] that inspects the cursor, consumes
//! at most one token's worth of input and reports the token it produced (if
//! any) together with the state that follows.

use super::cursor::Cursor;
use crate::token::{
    Position, Token, TokenKind, classify_char, classify_literal, is_digit, is_identifier_char,
    is_whitespace,
};
use std::io::{self, Read};

/// Scanning states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Top level, outside of any parens
    Text,
    OpenParen,
    /// Between tokens while at least one paren is open
    InsideParen,
    Identifier,
    Number,
    CloseParen,
    Whitespace,
    Comment,
}

/// Why the machine stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// Input ended at top level
    Exhausted,
    /// An error token was produced
    Failed,
    /// Stopped from outside before reaching the end
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue(State),
    Halt(Halt),
}

/// Outcome of a single transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub token: Option<Token>,
    pub next: Transition,
}

impl Step {
    fn goto(state: State) -> Self {
        Self {
            token: None,
            next: Transition::Continue(state),
        }
    }

    fn emit(token: Token, state: State) -> Self {
        Self {
            token: Some(token),
            next: Transition::Continue(state),
        }
    }

    fn halt(halt: Halt) -> Self {
        Self {
            token: None,
            next: Transition::Halt(halt),
        }
    }
}

/// Line bookkeeping captured where the pending token starts
#[derive(Debug, Clone, Copy)]
struct Mark {
    offset: u64,
    line: u64,
    line_start: u64,
}

/// Cursor plus the position and nesting state the transitions share
pub struct Machine<R: Read> {
    cursor: Cursor<R>,
    /// End of the previously emitted token, i.e. start of the next one
    mark: Mark,
    line: u64,
    /// Byte offset of the first character of `line`
    line_start: u64,
    depth: usize,
}

impl<R: Read> Machine<R> {
    pub fn new(cursor: Cursor<R>) -> Self {
        Self {
            cursor,
            mark: Mark {
                offset: 0,
                line: 1,
                line_start: 0,
            },
            line: 1,
            line_start: 0,
            depth: 0,
        }
    }

    /// Start as if `depth` parens were already open
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Where the next token would start
    pub fn position(&self) -> Position {
        Self::position_of(self.mark)
    }

    /// Terminal end-of-stream token at the current cursor position
    pub fn eof_token(&self) -> Token {
        let offset = self.cursor.offset();
        Token::eof(Position::new(self.line, offset - self.line_start, offset))
    }

    pub fn take_io_error(&mut self) -> Option<io::Error> {
        self.cursor.take_io_error()
    }

    /// Run one transition out of `state`
    pub fn step(&mut self, state: State) -> Step {
        match state {
            State::Text => self.scan_text(),
            State::OpenParen => self.scan_open_paren(),
            State::InsideParen => self.scan_inside_paren(),
            State::Identifier => self.scan_identifier(),
            State::Number => self.scan_number(),
            State::CloseParen => self.scan_close_paren(),
            State::Whitespace => self.scan_whitespace(),
            State::Comment => self.scan_comment(),
        }
    }

    fn scan_text(&mut self) -> Step {
        let Some(c) = self.cursor.peek() else {
            if let Some(bytes) = self.cursor.invalid_bytes() {
                let message = format!("Unexpected sequence: {}", hex(bytes));
                return self.fail(message);
            }
            return Step::halt(Halt::Exhausted);
        };

        match classify_char(c) {
            TokenKind::OpenParen => Step::goto(State::OpenParen),
            TokenKind::Comment => Step::goto(State::Comment),
            TokenKind::Whitespace => Step::goto(State::Whitespace),
            _ => {
                let mut buf = [0; 4];
                let bytes = c.encode_utf8(&mut buf).as_bytes();
                let message = format!("Unexpected sequence: {}", hex(bytes));
                self.fail(message)
            }
        }
    }

    fn scan_open_paren(&mut self) -> Step {
        if !self.consume('(') {
            return self.unexpected();
        }

        self.depth += 1;
        let token = self.token(TokenKind::OpenParen, "(");
        Step::emit(token, State::InsideParen)
    }

    fn scan_inside_paren(&mut self) -> Step {
        if self.depth == 0 {
            return Step::goto(State::Text);
        }

        let Some(c) = self.cursor.peek() else {
            return self.unexpected();
        };

        if is_digit(c) {
            return Step::goto(State::Number);
        }
        if is_identifier_char(c) {
            return Step::goto(State::Identifier);
        }

        match classify_char(c) {
            TokenKind::CloseParen => Step::goto(State::CloseParen),
            TokenKind::OpenParen => Step::goto(State::OpenParen),
            TokenKind::Whitespace => Step::goto(State::Whitespace),
            TokenKind::Comment => Step::goto(State::Comment),
            _ => self.unexpected(),
        }
    }

    fn scan_identifier(&mut self) -> Step {
        let text = self.take_while(is_identifier_char);
        if text.is_empty() {
            return self.unexpected();
        }

        let kind = classify_literal(&text);
        let token = self.token(kind, text);
        Step::emit(token, State::InsideParen)
    }

    /// Digits with an optional fraction. A run that keeps going with other
    /// identifier characters (`1.2.3`, `12abc`) is consumed whole and
    /// classified like any identifier run, which makes it an identifier.
    fn scan_number(&mut self) -> Step {
        let mut text = self.take_while(is_digit);
        if text.is_empty() {
            return self.unexpected();
        }

        let mut kind = TokenKind::Integer;
        if self.consume('.') {
            text.push('.');
            let fraction = self.take_while(is_digit);
            kind = if fraction.is_empty() {
                TokenKind::Identifier
            } else {
                TokenKind::Decimal
            };
            text.push_str(&fraction);
        }

        let tail = self.take_while(is_identifier_char);
        if !tail.is_empty() {
            text.push_str(&tail);
            kind = classify_literal(&text);
        }

        let token = self.token(kind, text);
        Step::emit(token, State::InsideParen)
    }

    fn scan_close_paren(&mut self) -> Step {
        if self.depth == 0 {
            return self.fail("Unexpected )".to_string());
        }
        if !self.consume(')') {
            return self.unexpected();
        }

        self.depth -= 1;
        let token = self.token(TokenKind::CloseParen, ")");
        Step::emit(token, State::InsideParen)
    }

    fn scan_whitespace(&mut self) -> Step {
        let mut text = String::new();
        loop {
            match self.cursor.next_char() {
                Some(c) if is_whitespace(c) => {
                    if c == '\n' {
                        self.line += 1;
                        self.line_start = self.cursor.offset();
                    }
                    text.push(c);
                }
                Some(_) => {
                    self.cursor.backup();
                    break;
                }
                None => break,
            }
        }

        if text.is_empty() {
            return self.unexpected();
        }

        let token = self.token(TokenKind::Whitespace, text);
        let next = if self.depth == 0 {
            State::Text
        } else {
            State::InsideParen
        };
        Step::emit(token, next)
    }

    /// Everything from `;` up to, but not including, the end of the line
    fn scan_comment(&mut self) -> Step {
        if self.cursor.peek() != Some(';') {
            return self.unexpected();
        }

        let mut text = String::new();
        let next = loop {
            match self.cursor.next_char() {
                Some('\n') => {
                    self.cursor.backup();
                    break State::Whitespace;
                }
                Some(c) => text.push(c),
                None if self.depth > 0 => break State::InsideParen,
                None => break State::Text,
            }
        };

        let token = self.token(TokenKind::Comment, text);
        Step::emit(token, next)
    }

    /// Consume `expected` if it is the next character
    fn consume(&mut self, expected: char) -> bool {
        match self.cursor.next_char() {
            Some(c) if c == expected => true,
            Some(_) => {
                self.cursor.backup();
                false
            }
            None => false,
        }
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.cursor.next_char() {
            if !accept(c) {
                self.cursor.backup();
                break;
            }
            text.push(c);
        }
        text
    }

    /// Build a token starting at the mark and move the mark to the cursor
    fn token(&mut self, kind: TokenKind, text: impl Into<String>) -> Token {
        let token = Token::new(kind, text, self.position());
        self.mark = Mark {
            offset: self.cursor.offset(),
            line: self.line,
            line_start: self.line_start,
        };
        token
    }

    /// Error for whatever sits at the cursor while parens are open
    fn unexpected(&mut self) -> Step {
        let message = match self.cursor.peek() {
            Some(c) => format!("Unexpected {c}"),
            None => match self.cursor.invalid_bytes() {
                Some(bytes) => format!("Unexpected sequence: {}", hex(bytes)),
                None => "Unexpected EOF".to_string(),
            },
        };
        self.fail(message)
    }

    fn fail(&self, message: String) -> Step {
        Step {
            token: Some(Token::error(message, self.position())),
            next: Transition::Halt(Halt::Failed),
        }
    }

    fn position_of(mark: Mark) -> Position {
        Position::new(mark.line, mark.offset.saturating_sub(mark.line_start), mark.offset)
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02X}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn machine(source: &str) -> Machine<&[u8]> {
        Machine::new(Cursor::new(source.as_bytes()))
    }

    fn emitted(step: &Step) -> (TokenKind, &str) {
        let token = step.token.as_ref().expect("step should emit a token");
        (token.kind, token.text.as_str())
    }

    #[test]
    fn test_text_dispatch() {
        assert_eq!(machine("(").step(State::Text), Step::goto(State::OpenParen));
        assert_eq!(machine(";").step(State::Text), Step::goto(State::Comment));
        assert_eq!(machine("\t").step(State::Text), Step::goto(State::Whitespace));
        assert_eq!(machine("").step(State::Text), Step::halt(Halt::Exhausted));
    }

    #[test]
    fn test_text_rejects_bare_characters_with_hex() {
        let step = machine("foo").step(State::Text);
        assert_eq!(emitted(&step), (TokenKind::Error, "Unexpected sequence: 66"));
        assert_eq!(step.next, Transition::Halt(Halt::Failed));

        let step = machine(")").step(State::Text);
        assert_eq!(emitted(&step), (TokenKind::Error, "Unexpected sequence: 29"));

        let step = machine("\u{e9}").step(State::Text);
        assert_eq!(emitted(&step), (TokenKind::Error, "Unexpected sequence: C3A9"));
    }

    #[test]
    fn test_text_reports_undecodable_bytes() {
        let mut machine = Machine::new(Cursor::new(&b"\xC0\xAF"[..]));
        let step = machine.step(State::Text);
        assert_eq!(emitted(&step), (TokenKind::Error, "Unexpected sequence: C0"));
    }

    #[test]
    fn test_undecodable_bytes_do_not_swallow_the_next_char() {
        let mut machine = Machine::new(Cursor::new(&b"\xC3("[..]));
        let step = machine.step(State::Text);
        assert_eq!(emitted(&step), (TokenKind::Error, "Unexpected sequence: C3"));

        let mut machine = Machine::new(Cursor::new(&b"\xC3)"[..])).with_depth(1);
        let step = machine.step(State::InsideParen);
        assert_eq!(emitted(&step), (TokenKind::Error, "Unexpected sequence: C3"));
    }

    #[test]
    fn test_open_paren_increments_depth() {
        let mut machine = machine("((");
        let step = machine.step(State::OpenParen);
        assert_eq!(emitted(&step), (TokenKind::OpenParen, "("));
        assert_eq!(step.next, Transition::Continue(State::InsideParen));
        assert_eq!(machine.depth(), 1);
        machine.step(State::OpenParen);
        assert_eq!(machine.depth(), 2);
        assert_eq!(machine.position(), Position::new(1, 2, 2));
    }

    #[test]
    fn test_inside_paren_dispatch() {
        let dispatch = |source: &str| machine(source).with_depth(1).step(State::InsideParen);
        assert_eq!(dispatch("7"), Step::goto(State::Number));
        assert_eq!(dispatch("x"), Step::goto(State::Identifier));
        assert_eq!(dispatch("+"), Step::goto(State::Identifier));
        assert_eq!(dispatch(".5"), Step::goto(State::Identifier));
        assert_eq!(dispatch(")"), Step::goto(State::CloseParen));
        assert_eq!(dispatch("("), Step::goto(State::OpenParen));
        assert_eq!(dispatch("\n"), Step::goto(State::Whitespace));
        assert_eq!(dispatch(";"), Step::goto(State::Comment));
    }

    #[test]
    fn test_inside_paren_at_depth_zero_returns_to_text() {
        assert_eq!(machine("x").step(State::InsideParen), Step::goto(State::Text));
    }

    #[test]
    fn test_inside_paren_errors() {
        let step = machine("").with_depth(1).step(State::InsideParen);
        assert_eq!(emitted(&step), (TokenKind::Error, "Unexpected EOF"));
        assert_eq!(step.next, Transition::Halt(Halt::Failed));

        let step = machine("\"str\"").with_depth(1).step(State::InsideParen);
        assert_eq!(emitted(&step), (TokenKind::Error, "Unexpected \""));

        let step = machine("<").with_depth(1).step(State::InsideParen);
        assert_eq!(emitted(&step), (TokenKind::Error, "Unexpected <"));
    }

    #[test]
    fn test_identifier_is_maximal_and_classified() {
        let mut machine = machine("foo-bar!)").with_depth(1);
        let step = machine.step(State::Identifier);
        assert_eq!(emitted(&step), (TokenKind::Identifier, "foo-bar!"));
        assert_eq!(step.next, Transition::Continue(State::InsideParen));
        assert_eq!(machine.position().offset, 8);

        let step = self::machine("true ").with_depth(1).step(State::Identifier);
        assert_eq!(emitted(&step), (TokenKind::Bool, "true"));
    }

    #[test]
    fn test_number_literals() {
        let scan = |source: &str| {
            let step = machine(source).with_depth(1).step(State::Number);
            let token = step.token.unwrap();
            (token.kind, token.text)
        };
        assert_eq!(scan("42)"), (TokenKind::Integer, "42".to_string()));
        assert_eq!(scan("00.123 "), (TokenKind::Decimal, "00.123".to_string()));
        assert_eq!(scan("3.14"), (TokenKind::Decimal, "3.14".to_string()));
    }

    #[test]
    fn test_malformed_numbers_fall_back_to_identifiers() {
        let scan = |source: &str| {
            let step = machine(source).with_depth(1).step(State::Number);
            let token = step.token.unwrap();
            (token.kind, token.text)
        };
        assert_eq!(scan("1.2.3)"), (TokenKind::Identifier, "1.2.3".to_string()));
        assert_eq!(scan("12abc"), (TokenKind::Identifier, "12abc".to_string()));
        assert_eq!(scan("1.)"), (TokenKind::Identifier, "1.".to_string()));
    }

    #[test]
    fn test_close_paren_decrements_depth() {
        let mut machine = machine(")").with_depth(2);
        let step = machine.step(State::CloseParen);
        assert_eq!(emitted(&step), (TokenKind::CloseParen, ")"));
        assert_eq!(machine.depth(), 1);
    }

    #[test]
    fn test_close_paren_at_depth_zero_is_an_error() {
        let mut machine = machine(")");
        let step = machine.step(State::CloseParen);
        assert_eq!(emitted(&step), (TokenKind::Error, "Unexpected )"));
        assert_eq!(step.next, Transition::Halt(Halt::Failed));
        assert_eq!(machine.depth(), 0);
    }

    #[test]
    fn test_whitespace_tracks_lines_from_run_start() {
        let mut machine = machine(" \n\t\n  x").with_depth(1);
        let step = machine.step(State::Whitespace);
        let token = step.token.unwrap();
        assert_eq!(token.text, " \n\t\n  ");
        assert_eq!(token.position, Position::new(1, 0, 0));
        assert_eq!(step.next, Transition::Continue(State::InsideParen));
        assert_eq!(machine.position(), Position::new(3, 2, 6));
    }

    #[test]
    fn test_whitespace_returns_to_text_at_top_level() {
        let step = machine("  (").step(State::Whitespace);
        assert_eq!(step.next, Transition::Continue(State::Text));
    }

    #[test]
    fn test_comment_stops_before_newline() {
        let mut machine = machine(";foo hooo\n(");
        let step = machine.step(State::Comment);
        assert_eq!(emitted(&step), (TokenKind::Comment, ";foo hooo"));
        assert_eq!(step.next, Transition::Continue(State::Whitespace));
        assert_eq!(machine.position().offset, 9);
    }

    #[test]
    fn test_comment_at_end_of_input() {
        let step = machine("; tail").step(State::Comment);
        assert_eq!(emitted(&step), (TokenKind::Comment, "; tail"));
        assert_eq!(step.next, Transition::Continue(State::Text));

        let step = machine("; tail").with_depth(1).step(State::Comment);
        assert_eq!(step.next, Transition::Continue(State::InsideParen));
    }

    #[test]
    fn test_eof_token_position() {
        let mut machine = machine("\n ");
        machine.step(State::Whitespace);
        assert_eq!(machine.eof_token(), Token::eof(Position::new(2, 1, 2)));
    }
}
