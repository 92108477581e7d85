//! Scanning on a separate thread with tokens delivered over a channel

use super::scanner::Scanner;
use crate::common::ScanResult;
use crate::config::ScanConfig;
use crate::token::Token;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use std::io::Read;
use std::thread::{self, JoinHandle};

/// Token channel, bounded when a capacity is given
pub fn channel(capacity: Option<usize>) -> (Sender<Token>, Receiver<Token>) {
    match capacity {
        Some(capacity) => bounded(capacity),
        None => unbounded(),
    }
}

/// Consumer side of a running scan.
///
/// Iteration blocks until the next token arrives and ends once the scanner
/// has finished and closed the channel.
pub struct TokenStream {
    receiver: Receiver<Token>,
}

impl TokenStream {
    pub fn new(receiver: Receiver<Token>) -> Self {
        Self { receiver }
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.receiver.recv().ok()
    }
}

/// Start scanning `source` on its own thread.
///
/// Dropping the returned stream makes the scanner stop at its next emit
/// with [`ScanError::SinkClosed`](crate::common::ScanError::SinkClosed).
pub fn spawn<R>(
    source: R,
    config: ScanConfig,
) -> ScanResult<(TokenStream, JoinHandle<ScanResult<()>>)>
where
    R: Read + Send + 'static,
{
    let (sender, receiver) = channel(config.channel_capacity);
    let handle = thread::Builder::new()
        .name("hsc-scanner".to_string())
        .spawn(move || Scanner::with_config(source, sender, config).run())?;
    Ok((TokenStream::new(receiver), handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ScanError;
    use crate::scan::tokenize;
    use crate::token::TokenKind;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    const SOURCE: &str = "; demo\n(define (twice f x)\n  (f (f x)))\n(twice inc 0.5)\n";

    #[test]
    fn test_stream_matches_in_memory_scan() {
        let (stream, handle) = spawn(Cursor::new(SOURCE), ScanConfig::new()).unwrap();
        let streamed: Vec<Token> = stream.collect();
        handle.join().unwrap().unwrap();
        assert_eq!(streamed, tokenize(SOURCE).unwrap());
    }

    #[test]
    fn test_bounded_channel_preserves_order() {
        let config = ScanConfig::new().with_channel_capacity(1);
        let (stream, handle) = spawn(Cursor::new(SOURCE), config).unwrap();
        let streamed: Vec<Token> = stream.collect();
        handle.join().unwrap().unwrap();

        let offsets: Vec<u64> = streamed.iter().map(|t| t.position.offset).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        assert_eq!(offsets, sorted);
        assert_eq!(streamed.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_stream_ends_after_error() {
        let (stream, handle) = spawn(Cursor::new("(a b"), ScanConfig::new()).unwrap();
        let kinds: Vec<TokenKind> = stream.map(|t| t.kind).collect();
        handle.join().unwrap().unwrap();
        assert_eq!(kinds.last(), Some(&TokenKind::Error));
    }

    #[test]
    fn test_dropping_the_stream_stops_the_scanner() {
        let config = ScanConfig::new().with_channel_capacity(1);
        let (mut stream, handle) = spawn(Cursor::new(SOURCE), config).unwrap();
        assert_eq!(stream.next().map(|t| t.kind), Some(TokenKind::Comment));
        drop(stream);
        assert!(matches!(handle.join().unwrap(), Err(ScanError::SinkClosed)));
    }
}
