//! Diagnostics for malformed XML.
//!
//! Every problem found while reading a document is a [`Diagnostic`] with an
//! [`ErrorCode`], a message and [`Label`]s pointing into the source. The
//! reader keeps going after recoverable problems such as an unknown entity,
//! so one [`ParseError`] can carry several diagnostics.
//!
//! # Example
//!
//! ```
//! # use plotgraph_parser::error::{Diagnostic, ErrorCode};
//! # use plotgraph_parser::Span;
//! let diag = Diagnostic::new(ErrorCode::E002, "element `scene` is never closed")
//!     .with_label(Span::new(10..17), "opened here")
//!     .with_help("add a matching `</scene>`");
//!
//! assert_eq!(diag.to_string(), "error[E002]: element `scene` is never closed");
//! ```

mod code;
mod diagnostic;
mod report;

pub use code::ErrorCode;
pub use diagnostic::{Diagnostic, Label, LabelKind};
pub use report::ParseError;

pub(crate) use report::DiagnosticCollector;
