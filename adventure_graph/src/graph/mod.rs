//! Graph Model - the validated, immutable adventure used during playback.

use std::collections::HashMap;

use crate::error::GraphError;
use crate::model::{AdventureGraph, Link, Node, NodeId, NodeKind};
use crate::props::StyleProps;

/// A choice offered on a node: the link and where taking it leads.
#[derive(Debug, Clone, Copy)]
pub struct Choice<'a> {
    pub link: &'a Link,
    /// Node reached by taking this choice.
    pub destination: NodeId,
}

impl Choice<'_> {
    /// Label shown to the reader.
    pub fn label(&self) -> &str {
        &self.link.label
    }
}

/// The loaded adventure with lookup indexes.
///
/// Built once per load and never mutated; a reload replaces it wholesale.
#[derive(Debug, Clone)]
pub struct GraphModel {
    adventure: AdventureGraph,

    /// Index: node id -> position in `adventure.nodes`.
    node_index: HashMap<NodeId, usize>,

    /// Index: node id -> (link position, destination), in choice order.
    choices: HashMap<NodeId, Vec<(usize, NodeId)>>,

    /// Resolved start node.
    start: NodeId,
}

impl GraphModel {
    /// Validate an adventure and build its indexes.
    ///
    /// Node ids must be unique and every link endpoint must name an
    /// existing node.
    pub fn new(adventure: AdventureGraph) -> Result<Self, GraphError> {
        let mut node_index = HashMap::with_capacity(adventure.nodes.len());
        for (pos, node) in adventure.nodes.iter().enumerate() {
            if node_index.insert(node.node_id, pos).is_some() {
                return Err(GraphError::DuplicateNode(node.node_id));
            }
        }

        for link in &adventure.links {
            for endpoint in [link.source, link.target] {
                if !node_index.contains_key(&endpoint) {
                    return Err(GraphError::DanglingLink {
                        link: link.link_id,
                        node: endpoint,
                    });
                }
            }
        }

        let start = Self::find_start(&adventure)?;
        let choices = Self::index_choices(&adventure);

        Ok(Self {
            adventure,
            node_index,
            choices,
            start,
        })
    }

    /// First explicitly flagged node, else the first declared node.
    fn find_start(adventure: &AdventureGraph) -> Result<NodeId, GraphError> {
        let first = adventure.nodes.first().ok_or(GraphError::NoNodes)?;
        let flagged: Vec<_> = adventure.nodes.iter().filter(|n| n.is_start).collect();

        match flagged.len() {
            0 => tracing::warn!(
                adventure = %adventure.id,
                fallback = %first.node_id,
                "no explicit start node, using first declared node"
            ),
            1 => {}
            n => tracing::warn!(
                adventure = %adventure.id,
                count = n,
                chosen = %flagged[0].node_id,
                "multiple explicit start nodes, using the first"
            ),
        }

        Ok(flagged.first().map(|n| n.node_id).unwrap_or(first.node_id))
    }

    /// Links declared with the node as their source, in declaration order.
    ///
    /// Direction is carried as data only; a bidirectional link is still a
    /// choice on its source alone.
    fn index_choices(adventure: &AdventureGraph) -> HashMap<NodeId, Vec<(usize, NodeId)>> {
        let mut outgoing: HashMap<NodeId, Vec<(usize, NodeId)>> = HashMap::new();
        for (pos, link) in adventure.links.iter().enumerate() {
            outgoing
                .entry(link.source)
                .or_default()
                .push((pos, link.target));
        }
        outgoing
    }

    /// The underlying adventure record.
    pub fn adventure(&self) -> &AdventureGraph {
        &self.adventure
    }

    /// Adventure-level style props.
    pub fn props(&self) -> &StyleProps {
        &self.adventure.props
    }

    /// Look up a node by id.
    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.node_index
            .get(&id)
            .and_then(|pos| self.adventure.nodes.get(*pos))
    }

    /// Check whether a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    /// Choices available on a node, in stable declaration order.
    ///
    /// The position in this list is what digit shortcuts index into.
    pub fn links_from(&self, id: NodeId) -> Vec<Choice<'_>> {
        self.choices
            .get(&id)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(pos, destination)| {
                        self.adventure.links.get(*pos).map(|link| Choice {
                            link,
                            destination: *destination,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The nth choice (0-based) on a node.
    pub fn choice_at(&self, id: NodeId, index: usize) -> Option<Choice<'_>> {
        let (pos, destination) = *self.choices.get(&id)?.get(index)?;
        self.adventure.links.get(pos).map(|link| Choice { link, destination })
    }

    /// Number of choices available on a node.
    pub fn choice_count(&self, id: NodeId) -> usize {
        self.choices.get(&id).map(Vec::len).unwrap_or(0)
    }

    /// Classify a node as start, normal or end.
    pub fn resolve_kind(&self, node: &Node) -> NodeKind {
        if node.node_id == self.start {
            NodeKind::Start
        } else if self.choice_count(node.node_id) == 0 {
            NodeKind::End
        } else {
            NodeKind::Normal
        }
    }

    /// The node playback begins on.
    pub fn start_node(&self) -> NodeId {
        self.start
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> &[Node] {
        &self.adventure.nodes
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.adventure.nodes.len()
    }
}
