//! Sentinel navigation for touch and scroll.
//!
//! Two sentinel zones flank the current content block. When one becomes
//! dominant in the viewport it fires: the leading sentinel goes back, the
//! trailing one goes forward through history or takes the first choice.
//! A debounce lock stops one gesture from firing twice, and a settle delay
//! keeps gestures disarmed while the new node renders.

use adventure_graph::NodeId;
use serde::{Deserialize, Serialize};

use super::NavIntent;
use crate::config::GestureConfig;
use crate::session::PlaybackSession;

/// Which sentinel zone changed visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentinel {
    /// Above the content block.
    Before,
    /// Below the content block.
    After,
}

/// A gesture that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureOutcome {
    pub intent: NavIntent,
    /// Node the view should recentre on.
    pub recenter_on: NodeId,
}

/// Fires navigation from sentinel visibility changes.
#[derive(Debug, Clone)]
pub struct SentinelNavigator {
    config: GestureConfig,
    /// Debounce lock release time.
    locked_until_ms: u64,
    /// Earliest time gestures re-arm after a navigation.
    armed_at_ms: u64,
}

impl SentinelNavigator {
    /// Create a navigator with the given timing.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            locked_until_ms: 0,
            armed_at_ms: 0,
        }
    }

    /// Whether a gesture at `now_ms` would be suppressed.
    pub fn is_locked(&self, now_ms: u64) -> bool {
        now_ms < self.locked_until_ms || now_ms < self.armed_at_ms
    }

    /// React to a sentinel visibility change.
    ///
    /// Returns the outcome when a navigation happened.
    pub fn observe(
        &mut self,
        session: &mut PlaybackSession,
        zone: Sentinel,
        visible_ratio: f32,
        now_ms: u64,
    ) -> Option<GestureOutcome> {
        if visible_ratio < self.config.dominance_ratio || self.is_locked(now_ms) {
            return None;
        }

        let intent = match zone {
            Sentinel::Before => session.can_go_back().then_some(NavIntent::Back),
            Sentinel::After if session.can_go_forward() => Some(NavIntent::Forward),
            Sentinel::After => {
                let current = session.current_node_id()?;
                let first = session.graph()?.choice_at(current, 0)?;
                Some(NavIntent::Follow(first.destination))
            }
        }?;

        if !intent.apply(session) {
            return None;
        }

        self.locked_until_ms = now_ms + self.config.debounce_ms;
        self.armed_at_ms = now_ms + self.config.settle_ms;
        let recenter_on = session.current_node_id()?;
        tracing::debug!(?zone, ?intent, %recenter_on, "sentinel gesture fired");

        Some(GestureOutcome { intent, recenter_on })
    }
}
