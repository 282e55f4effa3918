//! Fallback nodes for documents without identifiers.

use log::warn;

use plotgraph_core::{document::Document, identifier::Id, semantic::NodeRegistry};

use crate::collect::NodeCollector;

/// Builds one node per top-level element of `document`.
///
/// Used when no element carries an identifier attribute. Each child of the
/// root becomes a node named `<tag>_<index>`, where `index` counts the root's
/// element children from zero. Labels come from the element itself, falling
/// back to the tag name.
pub fn synthesize(collector: &NodeCollector<'_>, document: &Document) -> NodeRegistry {
    warn!("No identified nodes found, using top-level children as nodes");

    let root = document.element(document.root());
    let mut registry = NodeRegistry::new();
    for (index, &child_id) in root.children().iter().enumerate() {
        let child = document.element(child_id);
        let id = Id::synthetic(child.tag(), index);
        let label = collector.label_for(child, None);
        registry.register(id, label, child.tag(), child_id);
    }
    registry
}
