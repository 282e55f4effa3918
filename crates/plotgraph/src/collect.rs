//! Node collection.
//!
//! Walks the whole element tree in document order and registers every element
//! that carries a recognized identifier attribute as a [`Node`]. The first
//! element seen with a given identifier wins.
//!
//! [`Node`]: plotgraph_core::semantic::Node

use log::{debug, trace};

use plotgraph_core::{
    document::{Document, Element},
    identifier::Id,
    semantic::NodeRegistry,
};

use crate::config::InferenceConfig;

/// Appended to labels that were cut to the maximum length.
pub const ELLIPSIS: &str = "...";

/// Finds identified elements and derives their labels.
pub struct NodeCollector<'c> {
    config: &'c InferenceConfig,
}

impl<'c> NodeCollector<'c> {
    /// Creates a collector using the given attribute conventions.
    pub fn new(config: &'c InferenceConfig) -> Self {
        Self { config }
    }

    /// Registers every identified element of `document`, in document order.
    ///
    /// Elements without an identifier are not nodes. A later element reusing
    /// an identifier is ignored.
    pub fn collect(&self, document: &Document) -> NodeRegistry {
        let mut registry = NodeRegistry::new();
        for (element_id, element) in document.descendants() {
            let Some(id) = self.find_id(element) else {
                continue;
            };
            let id = Id::new(&id);
            if registry.contains(id) {
                trace!(id:% = id, tag = element.tag(); "Duplicate identifier ignored");
                continue;
            }
            let label = self.label_for(element, Some(element.tag()));
            registry.register(id, label, element.tag(), element_id);
        }
        debug!(nodes = registry.len(); "Nodes collected");
        registry
    }

    /// Returns the element's identifier, trimmed.
    ///
    /// The first identifier attribute with a non-empty value decides. If that
    /// value is only whitespace the element has no identifier.
    pub fn find_id(&self, element: &Element) -> Option<String> {
        let value = first_present(element, self.config.id_attributes())?;
        let id = value.trim();
        (!id.is_empty()).then(|| id.to_string())
    }

    /// Derives the display label of an element.
    ///
    /// Checked in order: the label attributes, the element's leading text
    /// with newlines turned into spaces, then `fallback`, then the tag name.
    /// Attribute and text labels are truncated to the configured length.
    pub fn label_for(&self, element: &Element, fallback: Option<&str>) -> String {
        let max_len = self.config.max_label_len();

        if let Some(value) = first_present(element, self.config.label_attributes()) {
            return truncate(value.trim(), max_len);
        }

        let text = element.text().trim();
        if !text.is_empty() {
            return truncate(text.replace('\n', " ").trim(), max_len);
        }

        match fallback {
            Some(fallback) if !fallback.is_empty() => fallback.to_string(),
            _ => element.tag().to_string(),
        }
    }
}

/// Returns the value of the first listed attribute that is present and non-empty.
fn first_present<'e>(element: &'e Element, names: &[String]) -> Option<&'e str> {
    names
        .iter()
        .filter_map(|name| element.attribute(name))
        .find(|value| !value.is_empty())
}

/// Cuts `text` to `max_len` characters, appending [`ELLIPSIS`] if anything was cut.
pub fn truncate(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}
