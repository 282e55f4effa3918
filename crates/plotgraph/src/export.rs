//! Export of story graphs to output formats.
//!
//! This module provides the [`Exporter`] trait implemented by the output
//! backends. It is the last stage of the pipeline:
//!
//! ```text
//! XML Source
//!     ↓ parse
//! Document
//!     ↓ collect, synthesize, infer
//! StoryGraph
//!     ↓ export (this module)
//! DOT / HTML text
//! ```
//!
//! # Available Backends
//!
//! - [`dot`] - Graphviz text via [`dot::Dot`]
//! - [`html`] - interactive vis-network page via [`html::Html`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. It converts into
//! [`PlotgraphError::Export`] at the crate boundary.
//!
//! [`PlotgraphError::Export`]: crate::PlotgraphError::Export

/// Graphviz DOT backend.
pub mod dot;
/// Interactive HTML backend.
pub mod html;

use thiserror::Error;

use plotgraph_core::semantic::StoryGraph;

/// Abstraction for graph export backends.
pub trait Exporter {
    /// Human readable name of the output format, used in log output.
    fn format_name(&self) -> &'static str;

    /// Renders `graph` to the backend's text format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the embedded graph data cannot be
    /// serialized.
    fn export_graph(&self, graph: &StoryGraph) -> Result<String, Error>;
}

/// Errors that can occur during graph export.
#[derive(Debug, Error)]
pub enum Error {
    /// Embedded graph data could not be serialized.
    #[error("Failed to serialize graph data: {0}")]
    Serialize(#[from] serde_json::Error),
}
