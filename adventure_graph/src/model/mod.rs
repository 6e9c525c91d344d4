//! Adventure records: identifiers, nodes and links.

mod link;
mod node;

pub use link::*;
pub use node::*;

use serde::{Deserialize, Serialize};

use crate::props::StyleProps;

/// Identifier of an adventure as assigned by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct AdventureId(pub i64);

impl std::fmt::Display for AdventureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a node, unique within one adventure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub i64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(pub i64);

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One complete adventure: metadata, style props, nodes and links.
///
/// Nodes and links keep their declaration order, which drives start-node
/// fallback and digit shortcuts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureGraph {
    pub id: AdventureId,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub view_slug: String,
    #[serde(default)]
    pub props: StyleProps,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl AdventureGraph {
    /// Create an empty adventure with the given id and title.
    pub fn new(id: AdventureId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            slug: String::new(),
            view_slug: String::new(),
            props: StyleProps::default(),
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Set the adventure-level style props.
    pub fn with_props(mut self, props: StyleProps) -> Self {
        self.props = props;
        self
    }

    /// Append a node.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Append a link.
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }
}

/// Classification of a node within its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Where playback begins.
    Start,
    /// Has at least one outgoing choice.
    Normal,
    /// No outgoing choices; the story ends here.
    End,
}
