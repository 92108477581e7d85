//! Runs the state machine and pushes tokens into a sink

use super::cursor::Cursor;
use super::machine::{Halt, Machine, State, Transition};
use super::sink::TokenSink;
use crate::common::ScanResult;
use crate::config::ScanConfig;
use crate::token::Token;
use std::io::Read;
use tracing::{debug, trace};

/// Scanner bound to one source and one sink.
///
/// [`Scanner::run`] consumes the scanner; when it returns the sink has been
/// dropped, which closes a channel sink for its receiver.
pub struct Scanner<R: Read, S: TokenSink> {
    machine: Machine<R>,
    sink: S,
    config: ScanConfig,
}

impl<R: Read, S: TokenSink> Scanner<R, S> {
    pub fn new(source: R, sink: S) -> Self {
        Self::with_config(source, sink, ScanConfig::default())
    }

    pub fn with_config(source: R, sink: S, config: ScanConfig) -> Self {
        Self {
            machine: Machine::new(Cursor::new(source)),
            sink,
            config,
        }
    }

    /// Scan the whole source.
    ///
    /// Lexical errors arrive in the sink as error tokens. `Err` is only
    /// returned when the sink stopped accepting tokens or the source failed
    /// to read; in the latter case the tokens scanned before the failure
    /// have already been delivered.
    pub fn run(mut self) -> ScanResult<()> {
        debug!("scan started");

        let mut state = State::Text;
        let halt = loop {
            if self.config.is_cancelled() {
                break Halt::Cancelled;
            }

            let step = self.machine.step(state);
            if let Some(token) = step.token {
                self.emit(token)?;
            }

            match step.next {
                Transition::Continue(next) => {
                    trace!(from = ?state, to = ?next, "transition");
                    state = next;
                }
                Transition::Halt(halt) => break halt,
            }
        };

        let send_eof = match halt {
            Halt::Exhausted => true,
            Halt::Failed => self.config.eof_after_error,
            Halt::Cancelled => false,
        };
        if send_eof {
            let eof = self.machine.eof_token();
            self.emit(eof)?;
        }

        debug!(?halt, depth = self.machine.depth(), "scan finished");

        if let Some(err) = self.machine.take_io_error() {
            return Err(err.into());
        }
        Ok(())
    }

    fn emit(&mut self, token: Token) -> ScanResult<()> {
        trace!(%token, "emit");
        self.sink.emit(token)
    }
}

/// Scan an in-memory source into a vector of tokens
pub fn tokenize(source: &str) -> ScanResult<Vec<Token>> {
    let mut tokens = Vec::new();
    Scanner::new(source.as_bytes(), &mut tokens).run()?;
    Ok(tokens)
}
