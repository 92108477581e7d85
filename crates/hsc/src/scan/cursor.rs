//! Character reader with a single character of pushback

use std::io::{self, BufReader, Bytes, Read};
use tracing::warn;

/// Pull-based UTF-8 reader over a byte source.
///
/// The cursor tracks the absolute byte offset of the next unread character.
/// End of input and undecodable sequences both read as `None`; the
/// offending bytes of the latter stay available through
/// [`Cursor::invalid_bytes`].
pub struct Cursor<R: Read> {
    bytes: Bytes<BufReader<R>>,
    /// Most recently read character, cleared once it is pushed back
    last: Option<char>,
    /// Character handed out again by the next read
    pushed_back: Option<char>,
    offset: u64,
    exhausted: bool,
    invalid: Option<Vec<u8>>,
    io_error: Option<io::Error>,
}

impl<R: Read> Cursor<R> {
    pub fn new(source: R) -> Self {
        Self {
            bytes: BufReader::new(source).bytes(),
            last: None,
            pushed_back: None,
            offset: 0,
            exhausted: false,
            invalid: None,
            io_error: None,
        }
    }

    /// Read the next character and advance past it
    pub fn next_char(&mut self) -> Option<char> {
        let c = match self.pushed_back.take() {
            Some(c) => Some(c),
            None => self.decode(),
        };

        self.last = c;
        if let Some(c) = c {
            self.offset += c.len_utf8() as u64;
        }
        c
    }

    /// Un-read the most recently read character.
    ///
    /// Only one character can be pushed back; a second call, or a call after
    /// `next_char` returned `None`, does nothing.
    pub fn backup(&mut self) {
        if let Some(c) = self.last.take() {
            self.offset -= c.len_utf8() as u64;
            self.pushed_back = Some(c);
        }
    }

    /// Look at the next character without consuming it
    pub fn peek(&mut self) -> Option<char> {
        let c = self.next_char();
        self.backup();
        c
    }

    /// Byte offset of the next unread character
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Bytes that could not be decoded, if decoding stopped on them
    pub fn invalid_bytes(&self) -> Option<&[u8]> {
        self.invalid.as_deref()
    }

    /// Read failure that ended the input early, if any
    pub fn take_io_error(&mut self) -> Option<io::Error> {
        self.io_error.take()
    }

    fn decode(&mut self) -> Option<char> {
        if self.exhausted {
            return None;
        }

        let Some(lead) = self.read_byte() else {
            self.exhausted = true;
            return None;
        };

        let width = utf8_width(lead);
        let mut buf = [lead, 0, 0, 0];
        let mut len = 1;
        while len < width {
            // A stray non-continuation byte ends the bad sequence and is not
            // reported as part of it
            match self.read_byte() {
                Some(byte @ 0x80..=0xBF) => {
                    buf[len] = byte;
                    len += 1;
                }
                _ => break,
            }
        }

        let decoded = std::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|s| s.chars().next());
        if decoded.is_none() {
            self.invalid = Some(buf[..len].to_vec());
            self.exhausted = true;
        }
        decoded
    }

    fn read_byte(&mut self) -> Option<u8> {
        match self.bytes.next()? {
            Ok(byte) => Some(byte),
            Err(err) => {
                warn!(
                    offset = self.offset,
                    error = %err,
                    "source read failed, treating as end of input"
                );
                self.io_error = Some(err);
                None
            }
        }
    }
}

/// Encoded length announced by a UTF-8 lead byte, 0 if it cannot start a
/// character
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
