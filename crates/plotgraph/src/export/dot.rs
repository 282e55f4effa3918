//! Graphviz DOT output.

use plotgraph_core::semantic::{Node, StoryGraph};

use super::{Error, Exporter};
use crate::config::{DisplayMode, RenderConfig};

/// Writes a story graph as a left-to-right directed graph with boxed nodes.
#[derive(Debug, Clone)]
pub struct Dot {
    graph_name: String,
    display: DisplayMode,
}

impl Dot {
    /// Creates a DOT exporter using the render settings.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            graph_name: config.graph_name().to_string(),
            display: config.display(),
        }
    }

    /// Renders `graph` as DOT text.
    ///
    /// One statement is written per node, in registry order, followed by
    /// one statement per edge. Edge labels are relation names.
    pub fn render(&self, graph: &StoryGraph) -> String {
        let mut out = format!("digraph {} {{\n", quote_id(&self.graph_name));
        out.push_str("  rankdir=LR;\n");
        out.push_str("  node [shape=box];\n");

        for node in graph.nodes().iter() {
            let id = node.id().to_string();
            out.push_str(&format!(
                "  \"{}\" [label=\"{}\"];\n",
                escape(&id),
                escape(&self.node_label(node)),
            ));
        }

        for edge in graph.edges() {
            out.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
                escape(&edge.from().to_string()),
                escape(&edge.to().to_string()),
                escape(&edge.relation().to_string()),
            ));
        }

        out.push_str("}\n");
        out
    }

    fn node_label(&self, node: &Node) -> String {
        match self.display {
            DisplayMode::Id => node.id().to_string(),
            DisplayMode::Label => node.label().to_string(),
        }
    }
}

impl Exporter for Dot {
    fn format_name(&self) -> &'static str {
        "DOT"
    }

    fn export_graph(&self, graph: &StoryGraph) -> Result<String, Error> {
        Ok(self.render(graph))
    }
}

/// Escapes backslashes and double quotes for a quoted DOT string.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Leaves plain graph names bare and quotes everything else.
fn quote_id(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", escape(name))
    }
}

#[cfg(test)]
mod tests {
    use plotgraph_core::{
        document::Document,
        identifier::Id,
        semantic::{Edge, NodeRegistry, Relation},
    };

    use super::*;

    fn graph() -> StoryGraph {
        let mut document = Document::new("story", Default::default());
        let root = document.root();
        let first = document.add_child(root, "scene", Default::default());
        let second = document.add_child(root, "scene", Default::default());

        let mut nodes = NodeRegistry::new();
        nodes.register(Id::new("start"), r#"Say "hi""#, "scene", first);
        nodes.register(Id::new("end"), "The end", "scene", second);
        let edges = vec![
            Edge::new(Id::new("start"), Id::new("end"), Relation::Attribute("goto".into())),
            Edge::new(Id::new("end"), Id::new("missing"), Relation::Inline),
        ];
        StoryGraph::new(nodes, edges, false)
    }

    #[test]
    fn test_render_ids() {
        let dot = Dot::new(&RenderConfig::default()).render(&graph());

        assert_eq!(
            dot,
            concat!(
                "digraph story {\n",
                "  rankdir=LR;\n",
                "  node [shape=box];\n",
                "  \"start\" [label=\"start\"];\n",
                "  \"end\" [label=\"end\"];\n",
                "  \"start\" -> \"end\" [label=\"goto\"];\n",
                "  \"end\" -> \"missing\" [label=\"inline\"];\n",
                "}\n",
            )
        );
    }

    #[test]
    fn test_render_labels_escapes_quotes() {
        let config = RenderConfig::default().with_display(DisplayMode::Label);
        let dot = Dot::new(&config).render(&graph());

        assert!(dot.contains(r#"  "start" [label="Say \"hi\""];"#));
        assert!(dot.contains(r#"  "end" [label="The end"];"#));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a\"b"#), r#"a\\\"b"#);
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_quote_graph_name() {
        assert_eq!(quote_id("story"), "story");
        assert_eq!(quote_id("my story"), "\"my story\"");
        assert_eq!(quote_id("1st"), "\"1st\"");
    }

    #[test]
    fn test_exporter_matches_render() {
        let dot = Dot::new(&RenderConfig::default());
        assert_eq!(dot.export_graph(&graph()).unwrap(), dot.render(&graph()));
        assert_eq!(dot.format_name(), "DOT");
    }
}
