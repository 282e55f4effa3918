//! In-memory XML element tree.
//!
//! A [`Document`] owns every element of one parsed XML file in an arena and
//! hands out [`ElementId`] handles. Only the parts of the markup that graph
//! inference looks at are kept: tag names, attributes in source order, and the
//! leading text of each element.

use indexmap::IndexMap;

/// Handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Returns the arena index of this element.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single XML element.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    text: String,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
}

impl Element {
    fn new(tag: String, attributes: IndexMap<String, String>, parent: Option<ElementId>) -> Self {
        Self {
            tag,
            attributes,
            text: String::new(),
            children: Vec::new(),
            parent,
        }
    }

    /// Returns the tag name as written in the source, including any prefix.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the value of an attribute. Names are matched case-sensitively.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns `true` if the attribute is present, even with an empty value.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Iterates over `(name, value)` pairs in source order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the text that appears before the first child element.
    ///
    /// Text following a child element belongs to no element's leading text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the direct child elements in document order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Returns the parent element, or `None` for the root.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

/// A parsed XML document: a single root element and its descendants.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use plotgraph_core::document::Document;
///
/// let mut doc = Document::new("story", IndexMap::new());
/// let root = doc.root();
/// let scene = doc.add_child(root, "scene", IndexMap::from([("id".to_string(), "s1".to_string())]));
/// doc.append_text(scene, "Once upon a time");
///
/// assert_eq!(doc.element(scene).attribute("id"), Some("s1"));
/// assert_eq!(doc.element(scene).text(), "Once upon a time");
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Creates a document holding only its root element.
    pub fn new(root_tag: impl Into<String>, attributes: IndexMap<String, String>) -> Self {
        Self {
            elements: vec![Element::new(root_tag.into(), attributes, None)],
        }
    }

    /// Returns the root element handle.
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Returns the element behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by a different document.
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    /// Returns the total number of elements, root included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always `false`: a document has at least its root.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends a new element as the last child of `parent`.
    pub fn add_child(
        &mut self,
        parent: ElementId,
        tag: impl Into<String>,
        attributes: IndexMap<String, String>,
    ) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements
            .push(Element::new(tag.into(), attributes, Some(parent)));
        self.elements[parent.0].children.push(id);
        id
    }

    /// Appends character data to the leading text of `id`.
    ///
    /// Once the element has a child, further text is tail text and is dropped.
    pub fn append_text(&mut self, id: ElementId, text: &str) {
        let element = &mut self.elements[id.0];
        if element.children.is_empty() {
            element.text.push_str(text);
        }
    }

    /// Iterates over all elements in document order.
    ///
    /// Document order is pre-order depth-first from the root: an element comes
    /// before its children, and a subtree is finished before its next sibling.
    /// The walk follows the child lists rather than the arena layout, so the
    /// order holds no matter in which order elements were added.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            document: self,
            stack: vec![self.root()],
        }
    }
}

/// Pre-order iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<ElementId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (ElementId, &'a Element);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let element = self.document.element(id);
        self.stack.extend(element.children.iter().rev());
        Some((id, element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn tags(doc: &Document) -> Vec<&str> {
        doc.descendants().map(|(_, el)| el.tag()).collect()
    }

    #[test]
    fn test_descendants_pre_order() {
        let mut doc = Document::new("story", IndexMap::new());
        let root = doc.root();
        let a = doc.add_child(root, "a", IndexMap::new());
        doc.add_child(a, "a1", IndexMap::new());
        let a2 = doc.add_child(a, "a2", IndexMap::new());
        doc.add_child(a2, "a2x", IndexMap::new());
        doc.add_child(root, "b", IndexMap::new());

        assert_eq!(tags(&doc), vec!["story", "a", "a1", "a2", "a2x", "b"]);
    }

    #[test]
    fn test_descendants_ignore_insertion_order() {
        let mut doc = Document::new("story", IndexMap::new());
        let root = doc.root();
        let a = doc.add_child(root, "a", IndexMap::new());
        doc.add_child(root, "b", IndexMap::new());
        // Added after `b`, but nested under `a`.
        doc.add_child(a, "a1", IndexMap::new());

        assert_eq!(tags(&doc), vec!["story", "a", "a1", "b"]);
    }

    #[test]
    fn test_attributes_keep_source_order() {
        let doc = Document::new("scene", attrs(&[("to", "b"), ("id", "a"), ("goto", "c")]));
        let root = doc.element(doc.root());

        let names: Vec<_> = root.attributes().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["to", "id", "goto"]);
        assert_eq!(root.attribute("id"), Some("a"));
        assert_eq!(root.attribute("ID"), None);
    }

    #[test]
    fn test_has_attribute_with_empty_value() {
        let doc = Document::new("choice", attrs(&[("target", "")]));
        let root = doc.element(doc.root());

        assert!(root.has_attribute("target"));
        assert_eq!(root.attribute("target"), Some(""));
        assert!(!root.has_attribute("next"));
    }

    #[test]
    fn test_tail_text_is_dropped() {
        let mut doc = Document::new("scene", IndexMap::new());
        let root = doc.root();
        doc.append_text(root, "before ");
        doc.append_text(root, "child");
        let child = doc.add_child(root, "choice", IndexMap::new());
        doc.append_text(root, "after child");
        doc.append_text(child, "inside");

        assert_eq!(doc.element(root).text(), "before child");
        assert_eq!(doc.element(child).text(), "inside");
        assert_eq!(doc.element(child).parent(), Some(root));
        assert_eq!(doc.element(root).parent(), None);
    }
}
