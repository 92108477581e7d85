//! Source positions attached to every emitted token

use std::fmt;

/// Where a token starts in the source.
///
/// `offset - column` is always the byte offset of the first character of
/// `line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// 1-based line number
    pub line: u64,
    /// 0-based byte column within `line`
    pub column: u64,
    /// 0-based absolute byte offset
    pub offset: u64,
}

impl Position {
    pub fn new(line: u64, column: u64, offset: u64) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Byte offset of the first character on this position's line
    pub fn line_start(&self) -> u64 {
        self.offset - self.column
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
