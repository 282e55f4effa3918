//! Error types for plotgraph operations.
//!
//! This module provides the main error type [`PlotgraphError`] which wraps
//! the error conditions that can occur while turning a document into a graph.

use std::{io, path::PathBuf};

use thiserror::Error;

use plotgraph_parser::error::ParseError;

/// The main error type for plotgraph operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the XML source next to the diagnostics so that
/// their byte spans can be shown as source snippets.
#[derive(Debug, Error)]
pub enum PlotgraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<crate::export::Error> for PlotgraphError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(error.to_string())
    }
}

impl PlotgraphError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
