//! Rendering of [`PlotgraphError`] through miette.
//!
//! A parse error becomes one [`Report`] per XML diagnostic, each carrying the
//! input as source code so that its labels show up as annotated snippets.
//! Any other error becomes a single [`Report`] with a `plotgraph::<kind>`
//! code and no snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use plotgraph::PlotgraphError;
use plotgraph_parser::{Span, error::Diagnostic};

/// A single renderable error.
#[derive(Debug)]
pub struct Report<'a> {
    message: String,
    code: String,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    src: Option<&'a str>,
}

impl<'a> Report<'a> {
    fn from_diagnostic(diag: &Diagnostic, src: &'a str) -> Self {
        let labels = diag
            .labels()
            .iter()
            .map(|label| {
                let span = span_to_miette(label.span(), src.len());
                let message = Some(label.message().to_string());
                if label.is_primary() {
                    LabeledSpan::new_primary_with_span(message, span)
                } else {
                    LabeledSpan::new_with_span(message, span)
                }
            })
            .collect();

        Self {
            message: diag.message().to_string(),
            code: diag.code().to_string(),
            help: diag.help().map(str::to_string),
            labels,
            src: Some(src),
        }
    }

    fn from_error(err: &PlotgraphError) -> Self {
        let (code, help) = match err {
            PlotgraphError::Io(_) => ("plotgraph::io", None),
            PlotgraphError::InputNotFound(_) => {
                ("plotgraph::input", Some("check the path passed to --xml"))
            }
            PlotgraphError::Parse { .. } => ("plotgraph::parse", None),
            PlotgraphError::Config(_) => ("plotgraph::config", None),
            PlotgraphError::Export(_) => ("plotgraph::export", None),
        };

        Self {
            message: err.to_string(),
            code: code.to_string(),
            help: help.map(str::to_string),
            labels: Vec::new(),
            src: None,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Report<'_> {}

impl MietteDiagnostic for Report<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.src.as_ref().map(|src| src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Box::new(self.labels.iter().cloned()))
    }
}

/// Convert a parser [`Span`] to a miette [`SourceSpan`], clamped to the source.
fn span_to_miette(span: Span, src_len: usize) -> SourceSpan {
    let start = span.start().min(src_len);
    let len = span.len().min(src_len - start);
    SourceSpan::new(start.into(), len)
}

/// Convert a [`PlotgraphError`] into the reports to render, in order.
pub fn to_reports(err: &PlotgraphError) -> Vec<Report<'_>> {
    match err {
        PlotgraphError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Report::from_diagnostic(diag, src))
            .collect(),
        _ => vec![Report::from_error(err)],
    }
}
