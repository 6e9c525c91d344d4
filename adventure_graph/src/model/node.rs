//! Node definitions.

use serde::{Deserialize, Deserializer, Serialize};

use super::NodeId;
use crate::props::StyleProps;

/// A single content unit in the adventure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub node_id: NodeId,

    /// Raw, markdown-capable content.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,

    /// Node-level style overrides.
    #[serde(default)]
    pub props: StyleProps,

    /// Explicitly marked as the adventure's start node.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_start: bool,
}

/// Reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Node {
    /// Create a node with the given id and text.
    pub fn new(node_id: NodeId, text: impl Into<String>) -> Self {
        Self {
            node_id,
            text: text.into(),
            props: StyleProps::default(),
            is_start: false,
        }
    }

    /// Set node-level style props.
    pub fn with_props(mut self, props: StyleProps) -> Self {
        self.props = props;
        self
    }

    /// Mark this node as the explicit start node.
    pub fn as_start(mut self) -> Self {
        self.is_start = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = Node::new(NodeId(7), "You wake up in a cave.").as_start();
        assert_eq!(node.node_id, NodeId(7));
        assert!(node.is_start);
        assert!(node.props.is_empty());
    }

    #[test]
    fn test_node_deserializes_with_defaults() {
        let node: Node = serde_json::from_str(r#"{"nodeId": 3}"#).unwrap();
        assert_eq!(node.node_id, NodeId(3));
        assert!(node.text.is_empty());
        assert!(!node.is_start);
    }

    #[test]
    fn test_node_reads_null_fields_as_defaults() {
        let node: Node =
            serde_json::from_str(r#"{"nodeId": 4, "text": null, "isStart": null}"#).unwrap();
        assert_eq!(node.node_id, NodeId(4));
        assert!(node.text.is_empty());
        assert!(!node.is_start);

        let flagged: Node =
            serde_json::from_str(r#"{"nodeId": 5, "text": "Go", "isStart": true}"#).unwrap();
        assert_eq!(flagged.text, "Go");
        assert!(flagged.is_start);
    }
}
