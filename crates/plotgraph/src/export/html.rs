//! Interactive HTML output backed by vis-network.
//!
//! The page embeds the nodes and edges as JSON arrays and lets vis-network
//! lay them out in the browser. Hovering a node shows its tag, identifier and
//! full label; clicking it shows the same text in an alert.

use quick_xml::escape::escape;
use serde::Serialize;

use plotgraph_core::{identifier::Id, semantic::StoryGraph};

use super::{Error, Exporter};
use crate::config::{DisplayMode, RenderConfig};

/// Node entry of the embedded data.
#[derive(Debug, Serialize)]
struct NodeData<'a> {
    id: Id,
    label: &'a str,
    title: String,
}

/// Edge entry of the embedded data.
#[derive(Debug, Serialize)]
struct EdgeData {
    from: Id,
    to: Id,
    label: String,
}

/// Writes a story graph as a standalone HTML page.
#[derive(Debug, Clone)]
pub struct Html {
    display: DisplayMode,
    page_title: String,
    script_url: String,
}

impl Html {
    /// Creates an HTML exporter using the render settings.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            display: config.display(),
            page_title: config.page_title().to_string(),
            script_url: config.script_url().to_string(),
        }
    }

    /// Renders `graph` as an HTML page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the graph data cannot be serialized.
    pub fn render(&self, graph: &StoryGraph) -> Result<String, Error> {
        let ids: Vec<String> = graph.nodes().iter().map(|node| node.id().to_string()).collect();
        let nodes: Vec<NodeData<'_>> = graph
            .nodes()
            .iter()
            .zip(&ids)
            .map(|(node, id)| {
                let title = format!("{} / {}\n{}", node.tag(), id, node.label());
                NodeData {
                    id: node.id(),
                    label: match self.display {
                        DisplayMode::Id => id.as_str(),
                        DisplayMode::Label => node.label(),
                    },
                    title: escape(title.as_str()).into_owned(),
                }
            })
            .collect();
        let edges: Vec<EdgeData> = graph
            .edges()
            .iter()
            .map(|edge| EdgeData {
                from: edge.from(),
                to: edge.to(),
                label: edge.relation().to_string(),
            })
            .collect();

        let nodes_json = script_safe(serde_json::to_string(&nodes)?);
        let edges_json = script_safe(serde_json::to_string(&edges)?);

        Ok(page(
            &escape(self.page_title.as_str()),
            &escape(self.script_url.as_str()),
            &nodes_json,
            &edges_json,
        ))
    }
}

impl Exporter for Html {
    fn format_name(&self) -> &'static str {
        "interactive HTML"
    }

    fn export_graph(&self, graph: &StoryGraph) -> Result<String, Error> {
        self.render(graph)
    }
}

/// Keeps embedded JSON from closing the surrounding script element.
fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}

/// Fills the page template. `title` and `script_url` must already be escaped.
fn page(title: &str, script_url: &str, nodes: &str, edges: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <script type="text/javascript" src="{script_url}"></script>
  <style>
    body {{ font-family: Arial, sans-serif; margin: 0; }}
    #mynetwork {{ width: 100%; height: 100vh; border: 1px solid #ddd; }}
  </style>
</head>
<body>
<div id="mynetwork"></div>
<script>
const nodes = {nodes};
const edges = {edges};
const container = document.getElementById('mynetwork');
const data = {{
  nodes: new vis.DataSet(nodes),
  edges: new vis.DataSet(edges)
}};
const options = {{
  nodes: {{
    shape: 'box',
    margin: 10,
    widthConstraint: {{ maximum: 300 }}
  }},
  edges: {{
    arrows: 'to',
    smooth: {{ type: 'cubicBezier' }}
  }},
  physics: {{
    stabilization: false,
    barnesHut: {{
      gravitationalConstant: -20000,
      springConstant: 0.001,
      springLength: 200
    }}
  }},
  interaction: {{ hover: true }}
}};
const network = new vis.Network(container, data, options);

network.on('click', function(params) {{
  if (params.nodes.length > 0) {{
    const nid = params.nodes[0];
    const n = nodes.find(x => x.id === nid);
    alert('Node: ' + nid + '\n' + (n.title || ''));
  }}
}});
</script>
</body>
</html>
"#
    )
}
