//! Inline markers in element text.

use regex::Regex;

use plotgraph_core::{
    identifier::Id,
    semantic::{Edge, Node, Relation},
};

use super::{EdgeDetector, InferenceContext};

/// Emits an edge for every marker like `goto b`, `jump #b` or `-> b` found in
/// the node element's own leading text.
///
/// The first capture group of the pattern is the target identifier.
#[derive(Debug, Clone)]
pub struct InlineMarkerDetector {
    pattern: Regex,
}

impl InlineMarkerDetector {
    /// Creates a detector from a compiled marker pattern.
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl EdgeDetector for InlineMarkerDetector {
    fn name(&self) -> &'static str {
        "inline-marker"
    }

    fn detect(&self, context: &InferenceContext<'_>, node: &Node) -> Vec<Edge> {
        let text = context.document().element(node.element()).text();
        self.pattern
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .map(|target| Edge::new(node.id(), Id::new(target.as_str()), Relation::Inline))
            .collect()
    }
}
