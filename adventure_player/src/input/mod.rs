//! Input Router - maps keys and gestures onto navigation.
//!
//! Every mapped action is guarded: if its precondition fails (nothing to go
//! back to, no such choice) the input is dropped without error.

mod gesture;

pub use gesture::*;

use adventure_graph::NodeId;
use serde::{Deserialize, Serialize};

use crate::config::GestureConfig;
use crate::session::PlaybackSession;

/// Keys the player reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    /// A digit key, `0..=9`.
    Digit(u8),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value such as `"ArrowLeft"` or `"3"`.
    pub fn from_key(key: &str) -> Option<Key> {
        match key {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            _ => Self::single_digit(key),
        }
    }

    /// Parse a DOM `KeyboardEvent.code` value such as `"Digit3"` or `"Numpad5"`.
    pub fn from_code(code: &str) -> Option<Key> {
        match code {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            _ => code
                .strip_prefix("Digit")
                .or_else(|| code.strip_prefix("Numpad"))
                .and_then(Self::single_digit),
        }
    }

    fn single_digit(s: &str) -> Option<Key> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_digit(10).map(|d| Key::Digit(d as u8)),
            _ => None,
        }
    }

    /// 0-based choice index for digits `1`-`9`. `0` addresses no choice.
    pub fn choice_index(self) -> Option<usize> {
        match self {
            Key::Digit(d) => usize::from(d).checked_sub(1),
            _ => None,
        }
    }
}

/// A navigation the reader asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavIntent {
    Back,
    Forward,
    Follow(NodeId),
}

impl NavIntent {
    /// Perform the intent on a session. Returns whether anything moved.
    pub fn apply(self, session: &mut PlaybackSession) -> bool {
        match self {
            NavIntent::Back => session.back(),
            NavIntent::Forward => session.forward(),
            NavIntent::Follow(node) => session.follow(node),
        }
    }
}

/// Raw input delivered to the router.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerInput {
    Key(Key),
    /// A sentinel zone's visible fraction changed.
    Sentinel {
        zone: Sentinel,
        visible_ratio: f32,
        now_ms: u64,
    },
}

/// Routes reader input to a session.
#[derive(Debug, Clone)]
pub struct InputRouter {
    gestures: SentinelNavigator,
}

impl InputRouter {
    /// Create a router with the given gesture timing.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            gestures: SentinelNavigator::new(config),
        }
    }

    /// The intent a key maps to on the session's current node, if allowed.
    pub fn intent_for_key(session: &PlaybackSession, key: Key) -> Option<NavIntent> {
        match key {
            Key::ArrowLeft => session.can_go_back().then_some(NavIntent::Back),
            // Only replays history; never invents a choice.
            Key::ArrowRight => session.can_go_forward().then_some(NavIntent::Forward),
            Key::Digit(_) => {
                let index = key.choice_index()?;
                let current = session.current_node_id()?;
                let choice = session.graph()?.choice_at(current, index)?;
                Some(NavIntent::Follow(choice.destination))
            }
        }
    }

    /// Handle one input, returning the intent that was applied.
    pub fn handle(
        &mut self,
        session: &mut PlaybackSession,
        input: PlayerInput,
    ) -> Option<NavIntent> {
        match input {
            PlayerInput::Key(key) => {
                let intent = Self::intent_for_key(session, key)?;
                intent.apply(session).then_some(intent)
            }
            PlayerInput::Sentinel {
                zone,
                visible_ratio,
                now_ms,
            } => self
                .gestures
                .observe(session, zone, visible_ratio, now_ms)
                .map(|outcome| outcome.intent),
        }
    }

    /// The gesture navigator, e.g. to read its lock state.
    pub fn gestures(&self) -> &SentinelNavigator {
        &self.gestures
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::testing::cave_json;
    use adventure_graph::{AdventureGraph, AdventureId, GraphModel, Link, LinkId, Node, NodeKind};

    fn session() -> PlaybackSession {
        let mut session = PlaybackSession::new();
        session.load_standalone(&cave_json(), None).unwrap();
        session
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(Key::from_key("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_key("7"), Some(Key::Digit(7)));
        assert_eq!(Key::from_key("12"), None);
        assert_eq!(Key::from_key("x"), None);
        assert_eq!(Key::from_code("Digit0"), Some(Key::Digit(0)));
        assert_eq!(Key::from_code("Numpad5"), Some(Key::Digit(5)));
        assert_eq!(Key::from_code("KeyA"), None);
    }

    #[test]
    fn test_choice_index() {
        assert_eq!(Key::Digit(1).choice_index(), Some(0));
        assert_eq!(Key::Digit(9).choice_index(), Some(8));
        assert_eq!(Key::Digit(0).choice_index(), None);
        assert_eq!(Key::ArrowLeft.choice_index(), None);
    }

    #[test]
    fn test_digit_navigates_only_within_range() {
        let mut router = InputRouter::default();

        for digit in [3u8, 9, 0] {
            let mut s = session();
            assert_eq!(router.handle(&mut s, PlayerInput::Key(Key::Digit(digit))), None);
            assert_eq!(s.history().visited().len(), 1);
        }

        let mut s = session();
        assert_eq!(
            router.handle(&mut s, PlayerInput::Key(Key::Digit(2))),
            Some(NavIntent::Follow(NodeId(3)))
        );
        assert_eq!(s.current_node_id(), Some(NodeId(3)));
    }

    #[test]
    fn test_zero_never_navigates() {
        let mut adventure = AdventureGraph::new(AdventureId(9), "Crossroads")
            .with_node(Node::new(NodeId(1), "Hub"));
        for n in 2..=11 {
            adventure = adventure
                .with_node(Node::new(NodeId(n), "Spoke"))
                .with_link(Link::new(LinkId(n), NodeId(1), NodeId(n), "Go"));
        }
        let mut s = PlaybackSession::new();
        s.load(GraphModel::new(adventure).unwrap(), None);
        assert_eq!(s.choice_count(), 10);

        let mut router = InputRouter::default();
        assert_eq!(router.handle(&mut s, PlayerInput::Key(Key::Digit(0))), None);
        assert_eq!(s.history().visited(), &[NodeId(1)]);

        assert_eq!(
            router.handle(&mut s, PlayerInput::Key(Key::Digit(9))),
            Some(NavIntent::Follow(NodeId(10)))
        );
    }

    #[test]
    fn test_bidirectional_target_offers_no_way_back() {
        let adventure = AdventureGraph::new(AdventureId(8), "Bridge")
            .with_node(Node::new(NodeId(1), "Near bank"))
            .with_node(Node::new(NodeId(2), "Far bank"))
            .with_link(Link::new(LinkId(1), NodeId(1), NodeId(2), "Cross").bidirectional());
        let mut s = PlaybackSession::new();
        s.load(GraphModel::new(adventure).unwrap(), None);

        let mut router = InputRouter::default();
        router.handle(&mut s, PlayerInput::Key(Key::Digit(1)));
        assert_eq!(s.current_node_id(), Some(NodeId(2)));

        assert_eq!(router.handle(&mut s, PlayerInput::Key(Key::Digit(1))), None);
        assert_eq!(s.current_node_id(), Some(NodeId(2)));
        assert_eq!(s.view(false).unwrap().kind, NodeKind::End);
    }

    #[test]
    fn test_arrows_follow_history() {
        let mut router = InputRouter::default();
        let mut s = session();

        assert_eq!(router.handle(&mut s, PlayerInput::Key(Key::ArrowLeft)), None);
        assert_eq!(router.handle(&mut s, PlayerInput::Key(Key::ArrowRight)), None);

        router.handle(&mut s, PlayerInput::Key(Key::Digit(1)));
        assert_eq!(
            router.handle(&mut s, PlayerInput::Key(Key::ArrowLeft)),
            Some(NavIntent::Back)
        );
        assert_eq!(s.current_node_id(), Some(NodeId(1)));
        assert_eq!(
            router.handle(&mut s, PlayerInput::Key(Key::ArrowRight)),
            Some(NavIntent::Forward)
        );
        assert_eq!(s.current_node_id(), Some(NodeId(2)));
    }

    #[test]
    fn test_inputs_without_adventure_are_ignored() {
        let mut router = InputRouter::default();
        let mut s = PlaybackSession::new();

        for key in [Key::ArrowLeft, Key::ArrowRight, Key::Digit(1)] {
            assert_eq!(router.handle(&mut s, PlayerInput::Key(key)), None);
        }
    }

    #[test]
    fn test_sentinel_input_routes_to_gestures() {
        let mut router = InputRouter::default();
        let mut s = session();

        let input = PlayerInput::Sentinel {
            zone: Sentinel::After,
            visible_ratio: 1.0,
            now_ms: 1_000,
        };
        assert_eq!(router.handle(&mut s, input), Some(NavIntent::Follow(NodeId(2))));
        assert!(router.gestures().is_locked(1_001));
    }
}
