//! Error types and diagnostic reporting

use crate::token::{Token, TokenKind};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::{Files, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream};
use std::ops::Range;
use thiserror::Error;

/// Failures of the scanner machinery itself.
///
/// Lexical errors are not represented here; they are emitted as
/// [`TokenKind::Error`] tokens.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("token sink closed before the scan finished")]
    SinkClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("diagnostic rendering failed: {0}")]
    Diagnostic(#[from] codespan_reporting::files::Error),
}

pub type ScanResult<T> = Result<T, ScanError>;

/// Diagnostic reporter for pretty output of error tokens
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Build a diagnostic for an error token. Other kinds yield `None`.
    pub fn to_diagnostic(
        &self,
        file_id: usize,
        token: &Token,
    ) -> ScanResult<Option<Diagnostic<usize>>> {
        if token.kind != TokenKind::Error {
            return Ok(None);
        }

        let range = self.label_range(file_id, token)?;
        Ok(Some(
            Diagnostic::error()
                .with_message("Lexer error")
                .with_labels(vec![Label::primary(file_id, range).with_message(&token.text)]),
        ))
    }

    /// Print an error token to stderr
    pub fn report_token(&self, file_id: usize, token: &Token) -> ScanResult<()> {
        if let Some(diagnostic) = self.to_diagnostic(file_id, token)? {
            term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic)?;
        }
        Ok(())
    }

    /// Render an error token without colors, e.g. for logs
    pub fn render_token(&self, file_id: usize, token: &Token) -> ScanResult<String> {
        let mut out = NoColor::new(Vec::new());
        if let Some(diagnostic) = self.to_diagnostic(file_id, token)? {
            term::emit(&mut out, &self.config, &self.files, &diagnostic)?;
        }
        Ok(String::from_utf8_lossy(&out.into_inner()).into_owned())
    }

    /// Span the offending character, or nothing at end of input
    fn label_range(&self, file_id: usize, token: &Token) -> ScanResult<Range<usize>> {
        let source = self.files.source(file_id)?;
        let start = usize::try_from(token.position.offset)
            .unwrap_or(source.len())
            .min(source.len());
        let width = source
            .get(start..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8);
        Ok(start..start + width)
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
