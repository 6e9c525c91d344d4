//! Playback session - one reader's view of one loaded adventure.
//!
//! A session owns the graph and its navigation history. Loads replace both
//! together and only after they fully succeed, so a failed load never
//! leaves the session half initialized.

use adventure_graph::{GraphModel, Node, NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LoadError;
use crate::history::NavigationHistory;
use crate::loader::{self, AdventureSource, Loader};
use crate::theme::{self, ThemeOutput};

/// Unique identifier for playback sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read the start node override from a URL query string.
///
/// Accepts `nodeId` or `nodeid`, with or without a leading `?`.
pub fn start_node_from_query(query: &str) -> Option<NodeId> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == "nodeId" || key == "nodeid")
        .and_then(|(_, value)| value.trim().parse().ok())
        .map(NodeId)
}

/// A choice as presented to the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    /// 1-based position, matching the digit shortcut.
    pub number: usize,
    pub label: String,
    pub destination: NodeId,
}

/// Everything needed to render the current node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    pub node_id: NodeId,
    pub kind: NodeKind,
    /// Raw markdown; sanitizing to HTML happens in the rendering layer.
    pub text: String,
    pub choices: Vec<ChoiceView>,
    pub theme: ThemeOutput,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// An explicitly constructed playback instance.
#[derive(Debug, Default)]
pub struct PlaybackSession {
    id: SessionId,
    graph: Option<GraphModel>,
    history: NavigationHistory,
}

impl PlaybackSession {
    /// Create a session with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a loaded graph and seed history with its start node.
    ///
    /// `requested_start` is honored only when it names a node in the graph.
    pub fn load(&mut self, graph: GraphModel, requested_start: Option<NodeId>) -> NodeId {
        let start = match requested_start {
            Some(id) if graph.contains(id) => id,
            Some(id) => {
                tracing::debug!(session = %self.id, requested = %id, "ignoring unknown start node");
                graph.start_node()
            }
            None => graph.start_node(),
        };

        self.history.initialize(start);
        self.graph = Some(graph);
        tracing::debug!(session = %self.id, %start, "session ready");
        start
    }

    /// Fetch an adventure and install it on success.
    pub async fn load_remote<S: AdventureSource>(
        &mut self,
        loader: &Loader<S>,
        adventure: &str,
        query: Option<&str>,
    ) -> Result<NodeId, LoadError> {
        let graph = loader.load_remote(adventure).await?;
        Ok(self.load(graph, query.and_then(start_node_from_query)))
    }

    /// Parse user-supplied text and install it on success.
    ///
    /// On failure the session is left exactly as it was.
    pub fn load_standalone(
        &mut self,
        text: &str,
        query: Option<&str>,
    ) -> Result<NodeId, LoadError> {
        let graph = loader::load_standalone(text)?;
        Ok(self.load(graph, query.and_then(start_node_from_query)))
    }

    /// Drop the loaded adventure and its history.
    pub fn reset(&mut self) {
        self.graph = None;
        self.history.clear();
    }

    /// Take a new choice leading to `node`. Unknown nodes are ignored.
    pub fn follow(&mut self, node: NodeId) -> bool {
        let known = self.graph.as_ref().is_some_and(|g| g.contains(node));
        let moved = known && self.history.follow(node);
        if moved {
            tracing::debug!(session = %self.id, %node, "followed link");
        }
        moved
    }

    /// Take the choice at 0-based `index` on the current node.
    pub fn follow_choice(&mut self, index: usize) -> bool {
        let destination = self.current_node_id().and_then(|current| {
            self.graph
                .as_ref()
                .and_then(|g| g.choice_at(current, index))
                .map(|c| c.destination)
        });
        destination.is_some_and(|node| self.follow(node))
    }

    /// Replay the previous history entry.
    pub fn back(&mut self) -> bool {
        self.history.back()
    }

    /// Replay the next history entry.
    pub fn forward(&mut self) -> bool {
        self.history.forward()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn graph(&self) -> Option<&GraphModel> {
        self.graph.as_ref()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// Id of the node currently rendered.
    pub fn current_node_id(&self) -> Option<NodeId> {
        self.history.current()
    }

    /// The node currently rendered.
    pub fn current_node(&self) -> Option<&Node> {
        let id = self.current_node_id()?;
        self.graph.as_ref()?.node_by_id(id)
    }

    /// Number of choices on the current node.
    pub fn choice_count(&self) -> usize {
        match (self.graph.as_ref(), self.current_node_id()) {
            (Some(graph), Some(current)) => graph.choice_count(current),
            _ => 0,
        }
    }

    /// Snapshot of the current node for rendering.
    pub fn view(&self, force_high_contrast: bool) -> Option<NodeView> {
        let graph = self.graph.as_ref()?;
        let node = self.current_node()?;

        let choices = graph
            .links_from(node.node_id)
            .iter()
            .enumerate()
            .map(|(i, choice)| ChoiceView {
                number: i + 1,
                label: choice.label().to_string(),
                destination: choice.destination,
            })
            .collect();

        Some(NodeView {
            node_id: node.node_id,
            kind: graph.resolve_kind(node),
            text: node.text.clone(),
            choices,
            theme: theme::resolve(graph.props(), &node.props, force_high_contrast),
            can_go_back: self.can_go_back(),
            can_go_forward: self.can_go_forward(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::testing::{cave_json, StaticSource};
    use crate::theme::ThemeSlot;

    fn loaded() -> PlaybackSession {
        let mut session = PlaybackSession::new();
        session.load_standalone(&cave_json(), None).unwrap();
        session
    }

    #[test]
    fn test_query_parsing() {
        assert_eq!(start_node_from_query("?nodeId=3"), Some(NodeId(3)));
        assert_eq!(start_node_from_query("a=1&nodeid=7"), Some(NodeId(7)));
        assert_eq!(start_node_from_query("nodeId=abc"), None);
        assert_eq!(start_node_from_query(""), None);
    }

    #[test]
    fn test_load_seeds_history() {
        let session = loaded();
        assert_eq!(session.current_node_id(), Some(NodeId(1)));
        assert_eq!(session.history().visited(), &[NodeId(1)]);
    }

    #[test]
    fn test_query_start_override() {
        let mut session = PlaybackSession::new();
        assert_eq!(session.load_standalone(&cave_json(), Some("?nodeId=2")).unwrap(), NodeId(2));
        assert_eq!(session.load_standalone(&cave_json(), Some("?nodeId=99")).unwrap(), NodeId(1));
    }

    #[test]
    fn test_failed_load_leaves_session_untouched() {
        let mut session = loaded();
        session.follow_choice(0);
        let before = session.history().clone();

        assert!(session.load_standalone(r#"{"nodes": []}"#, None).is_err());
        assert!(session.load_standalone("garbage", None).is_err());

        assert_eq!(session.history(), &before);
        assert_eq!(session.current_node_id(), Some(NodeId(2)));
    }

    #[test]
    fn test_follow_unknown_node_is_ignored() {
        let mut session = loaded();
        assert!(!session.follow(NodeId(42)));
        assert_eq!(session.history().visited().len(), 1);
    }

    #[test]
    fn test_follow_choice_and_history() {
        let mut session = loaded();

        assert_eq!(session.choice_count(), 2);
        assert!(session.follow_choice(0));
        assert_eq!(session.current_node_id(), Some(NodeId(2)));
        assert_eq!(session.choice_count(), 0);
        assert!(!session.follow_choice(0));

        assert!(session.back());
        assert!(session.follow_choice(1));
        assert_eq!(session.history().visited(), &[NodeId(1), NodeId(3)]);
        assert!(!session.can_go_forward());
    }

    #[test]
    fn test_view_merges_theme_and_lists_choices() {
        let mut session = loaded();
        let view = session.view(false).unwrap();

        assert_eq!(view.kind, NodeKind::Start);
        assert_eq!(view.choices.len(), 2);
        assert_eq!(view.choices[1].number, 2);
        assert_eq!(view.choices[1].label, "Swim");
        assert!(!view.can_go_back);

        session.follow_choice(0);
        let view = session.view(false).unwrap();
        assert_eq!(view.kind, NodeKind::End);
        assert_eq!(view.theme.slot(ThemeSlot::Background), Some("#101010"));
        assert_eq!(view.theme.slot(ThemeSlot::Text), Some("rgba(238, 238, 238, 1)"));
        assert!(view.can_go_back);

        assert!(session.view(true).unwrap().theme.high_contrast);
    }

    #[test]
    fn test_reset() {
        let mut session = loaded();
        session.reset();
        assert!(session.graph().is_none());
        assert!(session.view(false).is_none());
        assert!(!session.back());
    }

    #[tokio::test]
    async fn test_load_remote_with_query() {
        let loader = Loader::new(StaticSource::default().with("cave", cave_json()));
        let mut session = PlaybackSession::new();

        let start = session.load_remote(&loader, "cave", Some("nodeid=3")).await.unwrap();
        assert_eq!(start, NodeId(3));

        assert!(session.load_remote(&loader, "elsewhere", None).await.is_err());
        assert_eq!(session.current_node_id(), Some(NodeId(3)));
    }
}
