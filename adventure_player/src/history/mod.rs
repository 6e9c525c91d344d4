//! Navigation History - the visited-node stack with branch truncation.
//!
//! History is a single active path plus a cursor:
//! 1. **Follow** appends after the cursor, first discarding any forward tail
//! 2. **Back** moves the cursor left without touching the stack
//! 3. **Forward** moves the cursor right, replaying an existing entry
//!
//! Transitions whose precondition fails leave the state unchanged.

use adventure_graph::NodeId;
use serde::{Deserialize, Serialize};

/// Visited path and cursor for one playback session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NavigationHistory {
    /// No adventure loaded.
    #[default]
    Empty,
    /// `visited[index]` is the node currently rendered.
    Ready { visited: Vec<NodeId>, index: usize },
}

impl NavigationHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the history with the start node, replacing anything recorded.
    pub fn initialize(&mut self, start: NodeId) {
        *self = Self::Ready {
            visited: vec![start],
            index: 0,
        };
    }

    /// Take a new choice leading to `node`.
    ///
    /// Any entries beyond the cursor are dropped before appending.
    /// Returns `false` if the history is empty.
    pub fn follow(&mut self, node: NodeId) -> bool {
        match self {
            Self::Empty => false,
            Self::Ready { visited, index } => {
                let dropped = visited.len() - (*index + 1);
                if dropped > 0 {
                    visited.truncate(*index + 1);
                    tracing::debug!(dropped, "truncated abandoned forward history");
                }
                visited.push(node);
                *index += 1;
                true
            }
        }
    }

    /// Step back one entry. Returns `false` when already at the beginning.
    pub fn back(&mut self) -> bool {
        match self {
            Self::Ready { index, .. } if *index > 0 => {
                *index -= 1;
                true
            }
            _ => false,
        }
    }

    /// Step forward one recorded entry. Returns `false` at the tip.
    pub fn forward(&mut self) -> bool {
        match self {
            Self::Ready { visited, index } if *index + 1 < visited.len() => {
                *index += 1;
                true
            }
            _ => false,
        }
    }

    /// Whether `back` would move.
    pub fn can_go_back(&self) -> bool {
        matches!(self, Self::Ready { index, .. } if *index > 0)
    }

    /// Whether `forward` would move.
    pub fn can_go_forward(&self) -> bool {
        matches!(self, Self::Ready { visited, index } if *index + 1 < visited.len())
    }

    /// The node under the cursor.
    pub fn current(&self) -> Option<NodeId> {
        match self {
            Self::Empty => None,
            Self::Ready { visited, index } => visited.get(*index).copied(),
        }
    }

    /// The full visited path.
    pub fn visited(&self) -> &[NodeId] {
        match self {
            Self::Empty => &[],
            Self::Ready { visited, .. } => visited,
        }
    }

    /// Cursor position, if initialized.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Ready { index, .. } => Some(*index),
        }
    }

    /// Whether a start node has been recorded.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Drop all recorded state.
    pub fn clear(&mut self) {
        *self = Self::Empty;
    }
}
