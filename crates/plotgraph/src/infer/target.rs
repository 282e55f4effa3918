//! Target attributes on the node's own element.

use plotgraph_core::{
    document::Element,
    identifier::Id,
    semantic::{Edge, Node, Relation},
};

use super::{EdgeDetector, InferenceContext};

/// Emits one edge per target named in a target attribute, e.g. `goto="b c"`.
#[derive(Debug, Clone)]
pub struct TargetAttributeDetector {
    attributes: Vec<String>,
}

impl TargetAttributeDetector {
    /// Creates a detector checking `attributes` in order.
    pub fn new(attributes: &[String]) -> Self {
        Self {
            attributes: attributes.to_vec(),
        }
    }
}

impl EdgeDetector for TargetAttributeDetector {
    fn name(&self) -> &'static str {
        "target-attribute"
    }

    fn detect(&self, context: &InferenceContext<'_>, node: &Node) -> Vec<Edge> {
        let element = context.document().element(node.element());
        element_targets(element, &self.attributes)
            .into_iter()
            .map(|(attribute, target)| {
                Edge::new(node.id(), target, Relation::Attribute(attribute.to_string()))
            })
            .collect()
    }
}

/// Target references found on an element.
#[derive(Debug, Default)]
pub(super) struct ElementTargets<'a> {
    /// `(attribute name, target)` pairs in attribute then value order.
    pub(super) targets: Vec<(&'a str, Id)>,
    /// Whether any target attribute had a non-empty value, even one that
    /// split into nothing.
    pub(super) found: bool,
}

impl<'a> IntoIterator for ElementTargets<'a> {
    type Item = (&'a str, Id);
    type IntoIter = std::vec::IntoIter<(&'a str, Id)>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.into_iter()
    }
}

/// Collects the targets named by `attributes` on `element`.
///
/// Attributes with an empty value are ignored.
pub(super) fn element_targets<'a>(element: &Element, attributes: &'a [String]) -> ElementTargets<'a> {
    let mut result = ElementTargets::default();
    for attribute in attributes {
        let Some(value) = element.attribute(attribute) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        result.found = true;
        let name = attribute.as_str();
        result
            .targets
            .extend(split_targets(value).map(move |target| (name, Id::new(target))));
    }
    result
}

/// Splits an attribute value into target identifiers.
///
/// Parts are separated by runs of `,`, `;`, `/` or whitespace. A leading run
/// of `#` is removed from each part, and parts left empty are skipped.
pub(super) fn split_targets(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| matches!(c, ',' | ';' | '/') || c.is_whitespace())
        .map(|part| part.trim_start_matches('#'))
        .filter(|part| !part.is_empty())
}
