use std::fmt;

use crate::{error::ErrorCode, span::Span};

/// Whether a label marks the problem itself or related context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Where the problem is.
    Primary,
    /// Related location, such as where an unclosed element was opened.
    Context,
}

/// A message attached to a byte range of the source.
#[derive(Debug, Clone)]
pub struct Label {
    kind: LabelKind,
    span: Span,
    message: String,
}

impl Label {
    pub fn kind(&self) -> LabelKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.kind == LabelKind::Primary
    }
}

/// One problem found in an XML document.
///
/// Rendered by the CLI as:
///
/// ```text
/// error[E002]: element `scene` is never closed
///    |
///  3 |   <scene id="intro">
///    |   ^^^^^^^^^^^^^^^^^^ opened here
///    |
///    = help: add a matching `</scene>`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic without labels or help.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the labels in the order they were added.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Returns the span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }

    /// Marks where the problem is.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.labeled(LabelKind::Primary, span, message)
    }

    /// Points at a related location.
    pub fn with_context(self, span: Span, message: impl Into<String>) -> Self {
        self.labeled(LabelKind::Context, span, message)
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn labeled(mut self, kind: LabelKind, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            kind,
            span,
            message: message.into(),
        });
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_diagnostic_is_bare() {
        let diag = Diagnostic::new(ErrorCode::E004, "document has no root element");

        assert_eq!(diag.code(), ErrorCode::E004);
        assert_eq!(diag.message(), "document has no root element");
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
        assert!(diag.primary_span().is_none());
    }

    #[test]
    fn test_labels_keep_order_and_kind() {
        let diag = Diagnostic::new(ErrorCode::E001, "mismatched end tag")
            .with_context(Span::new(0..7), "`scene` opened here")
            .with_label(Span::new(40..48), "expected `</scene>`")
            .with_help("close elements in reverse order of opening");

        let kinds: Vec<_> = diag.labels().iter().map(Label::kind).collect();
        assert_eq!(kinds, [LabelKind::Context, LabelKind::Primary]);
        assert_eq!(diag.primary_span(), Some(Span::new(40..48)));
        assert_eq!(diag.labels()[0].message(), "`scene` opened here");
        assert_eq!(diag.help(), Some("close elements in reverse order of opening"));
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::new(ErrorCode::E003, "undefined entity `&nbsp;`");
        assert_eq!(diag.to_string(), "error[E003]: undefined entity `&nbsp;`");
    }
}
