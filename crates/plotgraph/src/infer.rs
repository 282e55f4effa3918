//! Edge inference.
//!
//! Edges are found by an ordered list of [`EdgeDetector`]s, each looking at
//! one kind of signal on a node's element:
//!
//! 1. [`TargetAttributeDetector`] - target attributes such as `goto="b"`.
//! 2. [`InlineMarkerDetector`] - `goto b` / `jump b` / `-> b` in the text.
//! 3. [`OptionChildDetector`] - option children such as `<choice to="b"/>`.
//!
//! [`EdgeInference`] runs the detectors for every node in registry order and
//! drops candidates it has already emitted. A node for which no detector
//! produced a new edge is linked to the next node with
//! [`Relation::DefaultNext`].

mod inline;
mod option;
mod target;

pub use inline::InlineMarkerDetector;
pub use option::OptionChildDetector;
pub use target::TargetAttributeDetector;

use std::collections::HashSet;

use log::{debug, trace};

use plotgraph_core::{
    document::Document,
    identifier::Id,
    semantic::{Edge, Node, NodeRegistry, Relation},
};

use crate::{PlotgraphError, config::InferenceConfig};

/// What a detector can see while looking at a node.
#[derive(Debug, Clone, Copy)]
pub struct InferenceContext<'a> {
    document: &'a Document,
    nodes: &'a NodeRegistry,
}

impl<'a> InferenceContext<'a> {
    /// Creates a context over a document and the nodes collected from it.
    pub fn new(document: &'a Document, nodes: &'a NodeRegistry) -> Self {
        Self { document, nodes }
    }

    /// Returns the document the nodes were collected from.
    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// Returns the node registry.
    pub fn nodes(&self) -> &'a NodeRegistry {
        self.nodes
    }

    /// Returns the identifier of the node after `node` in registry order.
    pub fn next_id(&self, node: &Node) -> Option<Id> {
        self.nodes.next_after(node).map(Node::id)
    }
}

/// A single edge-finding heuristic.
///
/// Detectors are stateless between nodes. They return candidate edges in the
/// order they found them; duplicates are removed by [`EdgeInference`].
pub trait EdgeDetector {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Returns the candidate edges leaving `node`.
    fn detect(&self, context: &InferenceContext<'_>, node: &Node) -> Vec<Edge>;
}

/// Runs the detectors over every node and collects the resulting edges.
pub struct EdgeInference {
    detectors: Vec<Box<dyn EdgeDetector>>,
}

impl EdgeInference {
    /// Creates the standard detector pipeline for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PlotgraphError::Config`] if the inline marker pattern is invalid.
    pub fn new(config: &InferenceConfig) -> Result<Self, PlotgraphError> {
        let detectors: Vec<Box<dyn EdgeDetector>> = vec![
            Box::new(TargetAttributeDetector::new(config.target_attributes())),
            Box::new(InlineMarkerDetector::new(config.inline_regex()?)),
            Box::new(OptionChildDetector::new(
                config.option_tags(),
                config.target_attributes(),
            )),
        ];
        Ok(Self::with_detectors(detectors))
    }

    /// Creates a pipeline from an explicit list of detectors, run in order.
    pub fn with_detectors(detectors: Vec<Box<dyn EdgeDetector>>) -> Self {
        Self { detectors }
    }

    /// Returns the detector names in the order they run.
    pub fn detector_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.detectors.iter().map(|detector| detector.name())
    }

    /// Infers the deduplicated edges of `nodes`.
    ///
    /// Nodes are visited in registry order. Within a node, edges keep the
    /// order of the detectors and then the order each detector reported them.
    pub fn infer(&self, document: &Document, nodes: &NodeRegistry) -> Vec<Edge> {
        let context = InferenceContext::new(document, nodes);
        let mut seen: HashSet<(Id, Id, String)> = HashSet::new();
        let mut edges = Vec::new();

        for node in nodes.iter() {
            let mut emitted = 0;
            for detector in &self.detectors {
                for edge in detector.detect(&context, node) {
                    if push_unique(&mut seen, &mut edges, edge) {
                        emitted += 1;
                    }
                }
            }

            if emitted == 0 {
                if let Some(next) = context.next_id(node) {
                    let edge = Edge::new(node.id(), next, Relation::DefaultNext);
                    push_unique(&mut seen, &mut edges, edge);
                }
            }
            trace!(node:% = node.id(), edges = emitted; "Node edges inferred");
        }

        debug!(nodes = nodes.len(), edges = edges.len(); "Edges inferred");
        edges
    }
}

/// Appends `edge` unless an edge with the same endpoints and relation label
/// was already emitted. Returns `true` if it was appended.
fn push_unique(seen: &mut HashSet<(Id, Id, String)>, edges: &mut Vec<Edge>, edge: Edge) -> bool {
    let key = (edge.from(), edge.to(), edge.relation().to_string());
    if !seen.insert(key) {
        return false;
    }
    edges.push(edge);
    true
}

#[cfg(test)]
mod tests {
    use plotgraph_parser::parse;

    use super::*;
    use crate::collect::NodeCollector;

    fn infer_with(config: &InferenceConfig, source: &str) -> Vec<(String, String, String)> {
        let document = parse(source).unwrap();
        let nodes = NodeCollector::new(config).collect(&document);
        let inference = EdgeInference::new(config).unwrap();
        inference
            .infer(&document, &nodes)
            .iter()
            .map(|edge| {
                (
                    edge.from().to_string(),
                    edge.to().to_string(),
                    edge.relation().to_string(),
                )
            })
            .collect()
    }

    fn infer(source: &str) -> Vec<(String, String, String)> {
        infer_with(&InferenceConfig::default(), source)
    }

    fn edge(from: &str, to: &str, relation: &str) -> (String, String, String) {
        (from.to_string(), to.to_string(), relation.to_string())
    }

    #[test]
    fn test_target_attribute_suppresses_default() {
        let edges = infer(r#"<story><scene id="s1" goto="s2"/><scene id="s2"/></story>"#);
        assert_eq!(edges, vec![edge("s1", "s2", "goto")]);
    }

    #[test]
    fn test_single_option_without_target() {
        let edges = infer(r#"<story><scene id="s1"><choice/></scene><scene id="s2"/></story>"#);
        assert_eq!(edges, vec![edge("s1", "s2", "child::default::next")]);
    }

    #[test]
    fn test_default_next_chain() {
        let edges = infer(r#"<story><scene id="a"/><scene id="b"/><scene id="c"/></story>"#);
        assert_eq!(
            edges,
            vec![
                edge("a", "b", "default::next"),
                edge("b", "c", "default::next"),
            ]
        );
    }

    #[test]
    fn test_tier_order_within_node() {
        let edges = infer(
            r#"<story>
                 <scene id="a" next="b">Then goto c.<option to="d"/></scene>
                 <scene id="b"/><scene id="c"/><scene id="d"/>
               </story>"#,
        );

        assert_eq!(
            &edges[..3],
            &[
                edge("a", "b", "next"),
                edge("a", "c", "inline"),
                edge("a", "d", "child::option@to"),
            ]
        );
    }

    #[test]
    fn test_same_target_via_different_attributes_is_kept() {
        let edges = infer(r#"<story><scene id="a" to="b" goto="b"/><scene id="b"/></story>"#);
        assert_eq!(edges, vec![edge("a", "b", "to"), edge("a", "b", "goto")]);
    }

    #[test]
    fn test_repeated_target_is_deduplicated() {
        let edges = infer(r#"<story><scene id="a" target="b, b;#b"/><scene id="b"/></story>"#);
        assert_eq!(edges, vec![edge("a", "b", "target")]);
    }

    #[test]
    fn test_repeated_inline_marker_is_deduplicated() {
        let edges = infer(r#"<story><scene id="a">goto b or GOTO b</scene><scene id="b"/></story>"#);
        assert_eq!(edges, vec![edge("a", "b", "inline")]);
    }

    #[test]
    fn test_multiple_options_label_each_fallback() {
        let edges = infer(
            r#"<story>
                 <scene id="a">
                   <choice to="c"/>
                   <choice/>
                   <link/>
                 </scene>
                 <scene id="b"/>
                 <scene id="c"/>
               </story>"#,
        );

        assert_eq!(
            &edges[..3],
            &[
                edge("a", "c", "child::choice@to"),
                edge("a", "b", "child::choice::default::next"),
                edge("a", "b", "child::link::default::next"),
            ]
        );
    }

    #[test]
    fn test_identical_option_fallbacks_collapse() {
        let edges = infer(
            r#"<story><scene id="a"><choice/><choice/></scene><scene id="b"/></story>"#,
        );
        assert_eq!(edges, vec![edge("a", "b", "child::choice::default::next")]);
    }

    #[test]
    fn test_last_node_has_no_edges() {
        let edges = infer(r#"<story><scene id="only"><choice/></scene></story>"#);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_empty_split_target_yields_nothing() {
        let edges = infer(r#"<story><scene id="a"><choice goto=" , ; "/></scene><scene id="b"/></story>"#);
        assert_eq!(edges, vec![edge("a", "b", "default::next")]);
    }

    #[test]
    fn test_dangling_targets_pass_through() {
        let edges = infer(r#"<story><scene id="a" goto="nowhere"/></story>"#);
        assert_eq!(edges, vec![edge("a", "nowhere", "goto")]);
    }

    #[test]
    fn test_nested_nodes_use_registry_order() {
        let edges = infer(
            r#"<story id="root">
                 <act id="act1"><scene id="s1"/></act>
                 <scene id="s2"/>
               </story>"#,
        );

        assert_eq!(
            edges,
            vec![
                edge("root", "act1", "default::next"),
                edge("act1", "s1", "default::next"),
                edge("s1", "s2", "default::next"),
            ]
        );
    }

    #[test]
    fn test_custom_target_attributes() {
        let config = InferenceConfig::default().with_target_attributes(["jump_to"]);
        let edges = infer_with(
            &config,
            r#"<story><scene id="a" jump_to="c" goto="b"/><scene id="b"/><scene id="c"/></story>"#,
        );
        assert_eq!(edges[0], edge("a", "c", "jump_to"));
        assert!(!edges.contains(&edge("a", "b", "goto")));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let config = InferenceConfig::default().with_inline_pattern("[");
        assert!(matches!(EdgeInference::new(&config), Err(PlotgraphError::Config(_))));
    }

    #[test]
    fn test_detector_names_in_order() {
        let inference = EdgeInference::new(&InferenceConfig::default()).unwrap();
        let names: Vec<_> = inference.detector_names().collect();
        assert_eq!(names, vec!["target-attribute", "inline-marker", "option-child"]);
    }

    #[test]
    fn test_without_detectors_only_defaults() {
        let document = parse(r#"<story><scene id="a" goto="c"/><scene id="b"/></story>"#).unwrap();
        let config = InferenceConfig::default();
        let nodes = NodeCollector::new(&config).collect(&document);
        let edges = EdgeInference::with_detectors(Vec::new()).infer(&document, &nodes);

        assert_eq!(edges, vec![Edge::new(Id::new("a"), Id::new("b"), Relation::DefaultNext)]);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        /// Generates a flat story whose scenes may carry a target, an inline
        /// marker or an option child pointing at another scene.
        fn story() -> impl Strategy<Value = String> {
            prop::collection::vec((0..4u8, 0..6usize), 1..8).prop_map(|scenes| {
                let mut source = String::from("<story>");
                for (index, (kind, target)) in scenes.iter().enumerate() {
                    let element = match kind {
                        0 => format!(r#"<scene id="s{index}"/>"#),
                        1 => format!(r#"<scene id="s{index}" goto="s{target} s{target}"/>"#),
                        2 => format!(r#"<scene id="s{index}">jump s{target}</scene>"#),
                        _ => format!(r#"<scene id="s{index}"><choice/><choice to="s{target}"/></scene>"#),
                    };
                    source.push_str(&element);
                }
                source.push_str("</story>");
                source
            })
        }

        proptest! {
            #[test]
            fn inference_is_idempotent(source in story()) {
                let document = parse(&source).unwrap();
                let config = InferenceConfig::default();
                let nodes = NodeCollector::new(&config).collect(&document);
                let inference = EdgeInference::new(&config).unwrap();

                prop_assert_eq!(
                    inference.infer(&document, &nodes),
                    inference.infer(&document, &nodes)
                );
            }

            #[test]
            fn edges_are_unique(source in story()) {
                let edges = infer(&source);
                let unique: HashSet<_> = edges.iter().collect();
                prop_assert_eq!(unique.len(), edges.len());
            }

            #[test]
            fn signal_free_nodes_link_to_next(count in 1..10usize) {
                let scenes: String = (0..count).map(|i| format!(r#"<scene id="n{i}"/>"#)).collect();
                let edges = infer(&format!("<story>{scenes}</story>"));

                prop_assert_eq!(edges.len(), count - 1);
                for (i, (from, to, relation)) in edges.iter().enumerate() {
                    prop_assert_eq!(from, &format!("n{i}"));
                    prop_assert_eq!(to, &format!("n{}", i + 1));
                    prop_assert_eq!(relation, "default::next");
                }
            }
        }
    }
}
