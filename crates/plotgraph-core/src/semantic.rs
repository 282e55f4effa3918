//! Story graph model.
//!
//! The types here are what node collection and edge inference produce and
//! what the exporters consume:
//!
//! - [`Node`] - one narrative unit found in the document.
//! - [`NodeRegistry`] - insertion-ordered, first-wins map of nodes by [`Id`].
//! - [`Edge`] and [`Relation`] - a directed navigation link and its provenance.
//! - [`StoryGraph`] - the registry together with its edges.

use std::fmt;

use indexmap::IndexMap;

use crate::{document::ElementId, identifier::Id};

/// A narrative unit (scene) of the story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: Id,
    label: String,
    tag: String,
    order: usize,
    element: ElementId,
}

impl Node {
    /// Returns the node identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the display label derived from the element.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the tag name of the originating element.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the zero-based position of this node in the registry.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the originating element.
    pub fn element(&self) -> ElementId {
        self.element
    }
}

/// Insertion-ordered collection of nodes keyed by identifier.
///
/// The first node registered under an identifier wins; later registrations
/// with the same identifier are ignored and never overwrite the label, tag or
/// order of the first one.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: IndexMap<Id, Node>,
}

impl NodeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node unless `id` is already taken.
    ///
    /// The new node's order is the number of nodes registered before it.
    /// Returns `true` if the node was inserted.
    pub fn register(
        &mut self,
        id: Id,
        label: impl Into<String>,
        tag: impl Into<String>,
        element: ElementId,
    ) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        let node = Node {
            id,
            label: label.into(),
            tag: tag.into(),
            order: self.nodes.len(),
            element,
        };
        self.nodes.insert(id, node);
        true
    }

    /// Returns the node registered under `id`.
    pub fn get(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns `true` if a node is registered under `id`.
    pub fn contains(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns the node that follows `node` in registry order, if any.
    pub fn next_after(&self, node: &Node) -> Option<&Node> {
        self.nodes
            .get_index(node.order + 1)
            .map(|(_, next)| next)
    }

    /// Iterates over nodes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Returns the number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no node is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Provenance of an inferred edge.
///
/// The [`Display`](fmt::Display) form is the relation label written into the
/// rendered graphs, and it is also what edge deduplication compares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Target attribute on the node's own element, e.g. `goto`.
    Attribute(String),
    /// Inline `goto x` / `jump x` / `-> x` marker in the node's text.
    Inline,
    /// Target attribute on an option child: `child::<tag>@<attribute>`.
    ChildAttribute { tag: String, attribute: String },
    /// The only option child had no target: `child::default::next`.
    ChildDefaultNext,
    /// One of several option children had no target: `child::<tag>::default::next`.
    ChildTagDefaultNext { tag: String },
    /// The node produced no other edge: `default::next`.
    DefaultNext,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Attribute(name) => f.write_str(name),
            Relation::Inline => f.write_str("inline"),
            Relation::ChildAttribute { tag, attribute } => {
                write!(f, "child::{tag}@{attribute}")
            }
            Relation::ChildDefaultNext => f.write_str("child::default::next"),
            Relation::ChildTagDefaultNext { tag } => write!(f, "child::{tag}::default::next"),
            Relation::DefaultNext => f.write_str("default::next"),
        }
    }
}

/// A directed navigation link between two node identifiers.
///
/// The target does not have to be a registered node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    from: Id,
    to: Id,
    relation: Relation,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(from: Id, to: Id, relation: Relation) -> Self {
        Self { from, to, relation }
    }

    /// Returns the source node identifier.
    pub fn from(&self) -> Id {
        self.from
    }

    /// Returns the target identifier.
    pub fn to(&self) -> Id {
        self.to
    }

    /// Returns the relation describing where this edge came from.
    pub fn relation(&self) -> &Relation {
        &self.relation
    }
}

/// A node registry together with the edges inferred for it.
#[derive(Debug, Clone)]
pub struct StoryGraph {
    nodes: NodeRegistry,
    edges: Vec<Edge>,
    synthesized: bool,
}

impl StoryGraph {
    /// Creates a graph from its parts.
    ///
    /// # Arguments
    ///
    /// * `nodes` - Registry of nodes in document order.
    /// * `edges` - Deduplicated edges in inference order.
    /// * `synthesized` - Whether the nodes were synthesized from top-level elements.
    pub fn new(nodes: NodeRegistry, edges: Vec<Edge>, synthesized: bool) -> Self {
        Self {
            nodes,
            edges,
            synthesized,
        }
    }

    /// Returns the node registry.
    pub fn nodes(&self) -> &NodeRegistry {
        &self.nodes
    }

    /// Returns the edges in inference order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns `true` if the nodes were synthesized because the document had
    /// no identified elements.
    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    /// Iterates over edges whose target is not a registered node.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|edge| !self.nodes.contains(edge.to))
    }
}
