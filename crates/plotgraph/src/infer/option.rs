//! Option children such as `<choice to="b"/>`.

use plotgraph_core::{
    document::Element,
    semantic::{Edge, Node, Relation},
};

use super::{EdgeDetector, InferenceContext, target::element_targets};

/// Emits edges for the direct children that represent player options.
///
/// A child is an option if its tag is one of the option tags (ignoring case)
/// or if it has any target attribute. Each option contributes its targets;
/// an option without a target links to the next node instead. That fallback
/// is labeled `child::default::next` when the node has a single option and
/// `child::<tag>::default::next` when it has several.
#[derive(Debug, Clone)]
pub struct OptionChildDetector {
    option_tags: Vec<String>,
    target_attributes: Vec<String>,
}

impl OptionChildDetector {
    /// Creates a detector for the given option tags and target attributes.
    pub fn new(option_tags: &[String], target_attributes: &[String]) -> Self {
        Self {
            option_tags: option_tags.iter().map(|tag| tag.to_lowercase()).collect(),
            target_attributes: target_attributes.to_vec(),
        }
    }

    fn is_option(&self, element: &Element) -> bool {
        let tag = element.tag().to_lowercase();
        self.option_tags.contains(&tag)
            || self
                .target_attributes
                .iter()
                .any(|attribute| element.has_attribute(attribute))
    }
}

impl EdgeDetector for OptionChildDetector {
    fn name(&self) -> &'static str {
        "option-child"
    }

    fn detect(&self, context: &InferenceContext<'_>, node: &Node) -> Vec<Edge> {
        let document = context.document();
        let options: Vec<&Element> = document
            .element(node.element())
            .children()
            .iter()
            .map(|&child| document.element(child))
            .filter(|child| self.is_option(child))
            .collect();

        let single = options.len() == 1;
        let mut edges = Vec::new();
        for option in options {
            let targets = element_targets(option, &self.target_attributes);
            if targets.found {
                edges.extend(targets.into_iter().map(|(attribute, target)| {
                    let relation = Relation::ChildAttribute {
                        tag: option.tag().to_string(),
                        attribute: attribute.to_string(),
                    };
                    Edge::new(node.id(), target, relation)
                }));
                continue;
            }

            let Some(next) = context.next_id(node) else {
                continue;
            };
            let relation = if single {
                Relation::ChildDefaultNext
            } else {
                Relation::ChildTagDefaultNext {
                    tag: option.tag().to_string(),
                }
            };
            edges.push(Edge::new(node.id(), next, relation));
        }
        edges
    }
}
