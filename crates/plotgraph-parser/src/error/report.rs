use thiserror::Error;

use crate::error::{Diagnostic, ErrorCode};

/// Error returned when a document cannot be read.
///
/// Holds every diagnostic found before reading stopped, in source order.
/// There is always at least one.
#[derive(Debug, Error)]
#[error("{}", summary(.diagnostics))]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if any diagnostic has the given code.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.diagnostics.iter().any(|diag| diag.code() == code)
    }
}

/// First diagnostic plus a count of the rest.
fn summary(diagnostics: &[Diagnostic]) -> String {
    match diagnostics.split_first() {
        None => "invalid XML document".to_string(),
        Some((first, [])) => first.to_string(),
        Some((first, rest)) => format!("{first} (+{} more)", rest.len()),
    }
}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

/// Gathers recoverable diagnostics while a document is read.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Records a problem and keeps reading.
    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Stops reading at a fatal problem, keeping what was recorded before it.
    pub(crate) fn abort(mut self, diagnostic: Diagnostic) -> ParseError {
        self.diagnostics.push(diagnostic);
        ParseError::from(self.diagnostics)
    }

    /// Fails if anything was recorded.
    pub(crate) fn finish(self) -> Result<(), ParseError> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(ParseError::from(self.diagnostics))
        }
    }
}
