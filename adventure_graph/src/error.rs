//! Errors raised while building a graph from an adventure record.

use thiserror::Error;

use crate::model::{LinkId, NodeId};

/// Structural problems that prevent an adventure from being played.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The adventure has no nodes, so there is nothing to start from.
    #[error("adventure has no nodes")]
    NoNodes,

    /// Two nodes share the same id.
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    /// A link points at a node that does not exist.
    #[error("link {link} references unknown node {node}")]
    DanglingLink { link: LinkId, node: NodeId },
}
