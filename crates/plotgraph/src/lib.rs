//! Plotgraph - navigation graphs for branching XML stories.
//!
//! A story document is read into an element tree, the elements that carry an
//! identifier become nodes, and navigation edges between them are inferred
//! from target attributes, inline `goto` markers, option children and finally
//! document order. The resulting graph can be rendered as Graphviz DOT or as
//! an interactive HTML page.

pub mod collect;
pub mod config;
pub mod export;
pub mod infer;

mod error;
mod synthesize;

pub use plotgraph_core::{document, identifier, semantic};

pub use error::PlotgraphError;

use log::{debug, info, warn};

use config::AppConfig;
use document::Document;
use export::{dot::Dot, html::Html};
use semantic::StoryGraph;

/// Builder for turning story documents into rendered graphs.
///
/// # Examples
///
/// ```rust
/// use plotgraph::{GraphBuilder, config::AppConfig};
///
/// let source = r#"<story><scene id="intro" goto="cave"/><scene id="cave"/></story>"#;
///
/// let builder = GraphBuilder::new(AppConfig::default());
/// let document = builder.parse(source).expect("Failed to parse");
/// let graph = builder.build(&document).expect("Failed to build graph");
///
/// assert_eq!(graph.nodes().len(), 2);
/// let dot = builder.render_dot(&graph);
/// assert!(dot.contains(r#""intro" -> "cave" [label="goto"];"#));
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    config: AppConfig,
}

impl GraphBuilder {
    /// Create a new graph builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Inference conventions and render settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse XML source text into a document.
    ///
    /// # Errors
    ///
    /// Returns [`PlotgraphError::Parse`] if the XML is malformed. The error
    /// keeps a copy of `source` for diagnostic output.
    pub fn parse(&self, source: &str) -> Result<Document, PlotgraphError> {
        info!("Parsing story document");

        let document = plotgraph_parser::parse(source)
            .map_err(|err| PlotgraphError::new_parse_error(err, source))?;

        debug!(elements = document.len(); "Document parsed successfully");
        Ok(document)
    }

    /// Build the story graph of a document.
    ///
    /// Nodes are the identified elements in document order. If there are
    /// none, one node is synthesized per top-level element. Edges are then
    /// inferred for every node.
    ///
    /// # Errors
    ///
    /// Returns [`PlotgraphError::Config`] if the inline marker pattern in the
    /// configuration is invalid.
    pub fn build(&self, document: &Document) -> Result<StoryGraph, PlotgraphError> {
        let inference = infer::EdgeInference::new(self.config.inference())?;
        let collector = collect::NodeCollector::new(self.config.inference());

        let mut nodes = collector.collect(document);
        let synthesized = nodes.is_empty();
        if synthesized {
            nodes = synthesize::synthesize(&collector, document);
        }

        let edges = inference.infer(document, &nodes);
        let graph = StoryGraph::new(nodes, edges, synthesized);

        let dangling = graph.dangling_edges().count();
        if dangling > 0 {
            debug!(dangling = dangling; "Edges point at unknown identifiers");
        }
        if graph.nodes().is_empty() {
            warn!("Story graph has no nodes");
        }
        info!(
            nodes = graph.nodes().len(),
            edges = graph.edges().len(),
            synthesized;
            "Story graph built"
        );
        Ok(graph)
    }

    /// Render a story graph as Graphviz DOT text.
    pub fn render_dot(&self, graph: &StoryGraph) -> String {
        Dot::new(self.config.render()).render(graph)
    }

    /// Render a story graph as an interactive HTML page.
    ///
    /// # Errors
    ///
    /// Returns [`PlotgraphError::Export`] if the graph data cannot be serialized.
    pub fn render_html(&self, graph: &StoryGraph) -> Result<String, PlotgraphError> {
        let html = Html::new(self.config.render()).render(graph)?;
        debug!(bytes = html.len(); "HTML rendered");
        Ok(html)
    }
}
