//! # Plotgraph Parser
//!
//! Reads XML story documents into a [`plotgraph_core::document::Document`].
//!
//! Any well-formed XML is accepted; there is no schema. Malformed input is
//! reported as a [`error::ParseError`] whose diagnostics point into the source.
//!
//! ## Usage
//!
//! ```
//! # use plotgraph_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         <story>
//!           <scene id="intro" goto="forest">It begins.</scene>
//!           <scene id="forest"/>
//!         </story>
//!     "#;
//!
//!     let document = parse(source)?;
//!     assert_eq!(document.len(), 3);
//!     Ok(())
//! }
//! ```

pub mod error;

mod parser;
mod span;

pub use span::Span;

use plotgraph_core::document::Document;

use error::ParseError;

/// Parse XML source text into a document.
///
/// The whole input is read before returning. Elements are stored in document
/// order, each with its attributes (entity references expanded) and its
/// leading text.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is not well-formed XML: syntax
/// errors, unclosed or mismatched elements, undefined entities, a missing
/// root element, or content after the root element.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    parser::read_document(source)
}
