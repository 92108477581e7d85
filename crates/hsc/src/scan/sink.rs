//! Destinations for emitted tokens

use crate::common::{ScanError, ScanResult};
use crate::token::Token;
use crossbeam_channel::Sender;

/// Receives tokens in source order as the scanner produces them
pub trait TokenSink {
    /// Push one token. An error means nobody is listening any more.
    fn emit(&mut self, token: Token) -> ScanResult<()>;
}

/// Blocks while a bounded channel is full. Fails once the receiving side
/// has been dropped.
impl TokenSink for Sender<Token> {
    fn emit(&mut self, token: Token) -> ScanResult<()> {
        self.send(token).map_err(|_| ScanError::SinkClosed)
    }
}

impl TokenSink for Vec<Token> {
    fn emit(&mut self, token: Token) -> ScanResult<()> {
        self.push(token);
        Ok(())
    }
}

impl<S: TokenSink + ?Sized> TokenSink for &mut S {
    fn emit(&mut self, token: Token) -> ScanResult<()> {
        (**self).emit(token)
    }
}
