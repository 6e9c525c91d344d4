//! Loader - turns a fetched or user-supplied payload into a validated graph.
//!
//! Two entry points share one pipeline:
//! 1. **Decode**: Parse the text as JSON
//! 2. **Check**: Network payloads must carry `nodes`; standalone files must
//!    pass the full structural schema
//! 3. **Normalize**: Map legacy link types onto `LinkDirection`
//! 4. **Build**: Construct the `GraphModel`, enforcing graph invariants
//!
//! Nothing here touches a session; callers install the graph only after a
//! load fully succeeds.

pub mod schema;

use adventure_graph::{
    AdventureGraph, AdventureId, GraphModel, Link, LinkDirection, LinkId, Node, NodeId,
    StyleProps,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadError;

/// Where adventures are fetched from.
///
/// This is the network boundary; implementations report failures as
/// `LoadError::Transport`.
#[async_trait]
pub trait AdventureSource: Send + Sync {
    /// Fetch the raw JSON text of an adventure.
    async fn fetch(&self, adventure: &str) -> Result<String, LoadError>;
}

/// Adventure payload as produced by the authoring layer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdventurePayload {
    #[serde(default)]
    id: AdventureId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    view_slug: Option<String>,
    #[serde(default)]
    props: StyleProps,
    nodes: Vec<Node>,
    #[serde(default)]
    links: Vec<LinkPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkPayload {
    link_id: LinkId,
    source: NodeId,
    target: NodeId,
    #[serde(default)]
    label: Option<String>,
    #[serde(default, rename = "type")]
    link_type: Option<String>,
}

/// Read the free-text link type used by older payloads.
pub fn direction_from_legacy(link_type: Option<&str>) -> LinkDirection {
    match link_type {
        Some(t) if t.to_ascii_lowercase().contains("bidirectional") => LinkDirection::Bidirectional,
        _ => LinkDirection::Directed,
    }
}

impl From<AdventurePayload> for AdventureGraph {
    fn from(payload: AdventurePayload) -> Self {
        let links = payload
            .links
            .into_iter()
            .map(|l| Link {
                link_id: l.link_id,
                source: l.source,
                target: l.target,
                label: l.label.unwrap_or_default(),
                direction: direction_from_legacy(l.link_type.as_deref()),
            })
            .collect();

        AdventureGraph {
            id: payload.id,
            title: payload.title.unwrap_or_default(),
            slug: payload.slug.unwrap_or_default(),
            view_slug: payload.view_slug.unwrap_or_default(),
            props: payload.props,
            nodes: payload.nodes,
            links,
        }
    }
}

/// A field of the wrong type is a `Schema` error at `$`; the JSON text itself
/// already decoded.
fn build(value: Value) -> Result<GraphModel, LoadError> {
    let payload: AdventurePayload =
        serde_json::from_value(value).map_err(|err| LoadError::Schema {
            path: "$".to_string(),
            reason: err.to_string(),
        })?;
    let graph = GraphModel::new(payload.into())?;
    tracing::info!(
        adventure = %graph.adventure().id,
        nodes = graph.node_count(),
        start = %graph.start_node(),
        "adventure loaded"
    );
    Ok(graph)
}

/// Loads adventures from a source or from standalone text.
pub struct Loader<S: AdventureSource> {
    source: S,
}

impl<S: AdventureSource> Loader<S> {
    /// Create a loader over the given source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch and build an adventure by identifier.
    ///
    /// Safe to retry: a failed attempt leaves nothing behind.
    pub async fn load_remote(&self, adventure: &str) -> Result<GraphModel, LoadError> {
        let text = self.source.fetch(adventure).await.map_err(|err| {
            tracing::warn!(adventure, %err, "adventure fetch failed");
            err
        })?;

        let value: Value = serde_json::from_str(&text)?;
        if !value.get("nodes").is_some_and(Value::is_array) {
            return Err(LoadError::MissingNodes);
        }
        build(value)
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Build an adventure from user-supplied text such as a chosen file.
pub fn load_standalone(text: &str) -> Result<GraphModel, LoadError> {
    let value: Value = serde_json::from_str(text).map_err(|err| {
        tracing::warn!(%err, "standalone adventure is not valid JSON");
        LoadError::Parse(err)
    })?;
    schema::validate(&value).map_err(|err| {
        tracing::warn!(%err, "standalone adventure failed validation");
        err
    })?;
    build(value)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source; unknown ids fail with a retryable transport error.
    #[derive(Default)]
    pub struct StaticSource {
        pub payloads: HashMap<String, String>,
        pub calls: AtomicUsize,
    }

    impl StaticSource {
        pub fn with(mut self, id: &str, payload: impl Into<String>) -> Self {
            self.payloads.insert(id.to_string(), payload.into());
            self
        }
    }

    #[async_trait]
    impl AdventureSource for StaticSource {
        async fn fetch(&self, adventure: &str) -> Result<String, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payloads
                .get(adventure)
                .cloned()
                .ok_or_else(|| LoadError::Transport {
                    message: format!("no adventure named {adventure}"),
                    retryable: true,
                })
        }
    }

    pub fn cave_json() -> String {
        serde_json::json!({
            "id": 5,
            "title": "The Cave",
            "slug": "the-cave",
            "viewSlug": "cave",
            "props": "{\"background_color\": \"#101010\"}",
            "nodes": [
                {"nodeId": 1, "text": "Entrance"},
                {"nodeId": 2, "text": "Tunnel", "props": {"text_color": "#eee"}},
                {"nodeId": 3, "text": "Lake"},
            ],
            "links": [
                {"linkId": 1, "source": 1, "target": 2, "label": "Go deeper", "type": "default"},
                {
                    "linkId": 2, "source": 1, "target": 3,
                    "label": "Swim", "type": "Bidirectional link",
                },
            ],
        })
        .to_string()
    }
}
