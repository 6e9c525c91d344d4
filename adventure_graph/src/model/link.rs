//! Link definitions.

use serde::{Deserialize, Serialize};

use super::{LinkId, NodeId};

/// How a link may be travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LinkDirection {
    /// Only from source to target.
    #[default]
    Directed,
    /// Drawn as a two-way edge; still a choice on its source only.
    Bidirectional,
}

/// A labeled edge between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub link_id: LinkId,
    pub source: NodeId,
    pub target: NodeId,
    pub label: String,
    pub direction: LinkDirection,
}

impl Link {
    /// Create a directed link.
    pub fn new(link_id: LinkId, source: NodeId, target: NodeId, label: impl Into<String>) -> Self {
        Self {
            link_id,
            source,
            target,
            label: label.into(),
            direction: LinkDirection::Directed,
        }
    }

    /// Make this link bidirectional.
    pub fn bidirectional(mut self) -> Self {
        self.direction = LinkDirection::Bidirectional;
        self
    }
}
