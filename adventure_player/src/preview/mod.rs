//! Live Override Scheduler - restorable, rate-limited style scrubbing while authoring.
//!
//! Callers open an override with `begin`, push values with `apply`, and
//! close it with `end`. Overrides nest: the baseline is captured when the
//! first caller begins and restored only when the last caller ends.
//! Writes between two flushes coalesce per key, and flushes run on the
//! host's frame tick at most once per configured interval.

mod target;
mod throttle;

pub use target::*;
pub use throttle::*;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::PreviewConfig;

/// A batch of style values to preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOverrides {
    /// CSS custom properties keyed by variable name.
    pub vars: BTreeMap<String, String>,
    pub background: Option<String>,
    pub text: Option<String>,
    pub overlay: Option<String>,
}

impl StyleOverrides {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background color.
    pub fn background(mut self, value: impl Into<String>) -> Self {
        self.background = Some(value.into());
        self
    }

    /// Set the text color.
    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.text = Some(value.into());
        self
    }

    /// Set the overlay color.
    pub fn overlay(mut self, value: impl Into<String>) -> Self {
        self.overlay = Some(value.into());
        self
    }

    /// Set a CSS variable.
    pub fn var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Whether the batch carries nothing.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
            && self.background.is_none()
            && self.text.is_none()
            && self.overlay.is_none()
    }

    /// Layer `newer` on top; its values win per key.
    fn absorb(&mut self, newer: StyleOverrides) {
        self.vars.extend(newer.vars);
        if newer.background.is_some() {
            self.background = newer.background;
        }
        if newer.text.is_some() {
            self.text = newer.text;
        }
        if newer.overlay.is_some() {
            self.overlay = newer.overlay;
        }
    }
}

/// Style state captured before scrubbing began.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Baseline {
    background: Option<String>,
    text: Option<String>,
    overlay: Option<String>,
}

impl Baseline {
    fn capture<T: OverrideTarget>(target: &T) -> Self {
        Self {
            background: target.background(),
            text: target.text_color(),
            overlay: target.overlay(),
        }
    }

    fn restore<T: OverrideTarget>(&self, target: &mut T) {
        target.set_background(self.background.as_deref());
        target.set_text_color(self.text.as_deref());
        target.set_overlay(self.overlay.as_deref());
    }
}

/// State that exists only while an override is open.
#[derive(Debug, Default)]
struct PreviewSession {
    baseline: Option<Baseline>,
    pending: StyleOverrides,
    /// Variables written to the target during this session.
    tracked_vars: BTreeSet<String>,
}

/// Schedules preview writes onto a live style target.
pub struct LiveOverrideScheduler<T: OverrideTarget, H: FrameHost> {
    host: H,
    target: Option<T>,
    throttle: FrameThrottle,
    active_count: usize,
    session: PreviewSession,
    flush_count: u64,
}

impl<T: OverrideTarget, H: FrameHost> LiveOverrideScheduler<T, H> {
    /// Create a scheduler with no target.
    pub fn new(host: H, config: &PreviewConfig) -> Self {
        Self {
            host,
            target: None,
            throttle: FrameThrottle::new(config.min_interval_ms()),
            active_count: 0,
            session: PreviewSession::default(),
            flush_count: 0,
        }
    }

    /// Point the scheduler at a new target, returning the previous one.
    ///
    /// While an override is open the previous target only loses its live
    /// marker (it is assumed to be leaving), and the new target gets a
    /// fresh baseline.
    pub fn set_target(&mut self, target: Option<T>) -> Option<T> {
        let same = match (&self.target, &target) {
            (Some(old), Some(new)) => old.id() == new.id(),
            (None, None) => true,
            _ => false,
        };
        if same {
            return std::mem::replace(&mut self.target, target);
        }

        let mut previous = std::mem::replace(&mut self.target, target);
        if self.is_active() {
            if let Some(old) = previous.as_mut() {
                old.set_live_marker(false);
            }
            self.session.tracked_vars.clear();
            self.session.baseline = None;
            self.mark_and_capture();
        }
        previous
    }

    /// Open an override. Only the outermost call captures the baseline.
    pub fn begin(&mut self) {
        self.active_count += 1;
        if self.active_count == 1 {
            self.mark_and_capture();
            tracing::debug!("live preview started");
        }
    }

    /// Stage values for the next flush and make sure one is scheduled.
    ///
    /// Ignored when no override is open or there is no target.
    pub fn apply(&mut self, overrides: StyleOverrides) {
        if !self.is_active() || self.target.is_none() || overrides.is_empty() {
            return;
        }
        self.session.pending.absorb(overrides);
        self.throttle.schedule(&mut self.host);
    }

    /// Host callback for a timer started by this scheduler.
    pub fn on_timer(&mut self, token: TimerToken) {
        self.throttle.on_timer(token, &mut self.host);
    }

    /// Host callback for a frame requested by this scheduler.
    pub fn on_frame(&mut self, token: FrameToken) {
        let now = self.host.now_ms();
        if self.throttle.on_frame(token, now) {
            self.flush();
        }
    }

    /// Close an override, restoring the baseline when the last one closes.
    pub fn end(&mut self) {
        self.end_with(true);
    }

    /// Close an override; with `restore` false the previewed values stay.
    pub fn end_with(&mut self, restore: bool) {
        if self.active_count == 0 {
            return;
        }
        self.active_count -= 1;
        if self.active_count > 0 {
            return;
        }

        self.throttle.cancel(&mut self.host);
        let session = std::mem::take(&mut self.session);

        if let Some(target) = self.target.as_mut() {
            target.set_live_marker(false);
            if restore {
                if let Some(baseline) = &session.baseline {
                    baseline.restore(target);
                }
                for name in &session.tracked_vars {
                    target.remove_var(name);
                }
            }
        }
        tracing::debug!(restore, "live preview ended");
    }

    fn mark_and_capture(&mut self) {
        if let Some(target) = self.target.as_mut() {
            target.set_live_marker(true);
            self.session.baseline = Some(Baseline::capture(target));
        }
    }

    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.session.pending);
        let Some(target) = self.target.as_mut() else {
            return;
        };

        if let Some(background) = &pending.background {
            target.set_background(Some(background));
        }
        if let Some(text) = &pending.text {
            target.set_text_color(Some(text));
        }
        for (name, value) in &pending.vars {
            target.set_var(name, value);
            self.session.tracked_vars.insert(name.clone());
        }
        if let Some(overlay) = &pending.overlay {
            target.set_overlay(Some(overlay));
        }

        self.flush_count += 1;
        tracing::debug!(
            vars = pending.vars.len(),
            flushes = self.flush_count,
            "flushed preview overrides"
        );
    }

    /// Whether at least one override is open.
    pub fn is_active(&self) -> bool {
        self.active_count > 0
    }

    /// Nesting depth of open overrides.
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Whether staged values are waiting for a flush.
    pub fn has_pending(&self) -> bool {
        !self.session.pending.is_empty()
    }

    /// Number of flushes performed.
    pub fn flush_count(&self) -> u64 {
        self.flush_count
    }

    /// The current target.
    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// The host primitives.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to advance a test clock.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::throttle::testing::ManualHost;
    use super::*;

    type Scheduler = LiveOverrideScheduler<StyleTarget, ManualHost>;

    fn scheduler() -> Scheduler {
        let mut scheduler = Scheduler::new(ManualHost::default(), &PreviewConfig::default());
        scheduler.set_target(Some(
            StyleTarget::new().with_background("white").with_text_color("black"),
        ));
        scheduler
    }

    fn fire_frame(scheduler: &mut Scheduler) {
        let frame = scheduler.host_mut().take_frame().expect("frame requested");
        scheduler.on_frame(frame);
    }

    fn target(scheduler: &Scheduler) -> &StyleTarget {
        scheduler.target().unwrap()
    }

    #[test]
    fn test_restores_baseline_after_flush() {
        let mut scheduler = scheduler();

        scheduler.begin();
        assert!(target(&scheduler).live);
        scheduler.apply(StyleOverrides::new().background("red").var("--adventure-accent", "#f00"));
        fire_frame(&mut scheduler);
        assert_eq!(target(&scheduler).background.as_deref(), Some("red"));

        scheduler.end();

        let t = target(&scheduler);
        assert_eq!(t.background.as_deref(), Some("white"));
        assert_eq!(t.text_color.as_deref(), Some("black"));
        assert!(t.vars.is_empty());
        assert!(!t.live);
    }

    #[test]
    fn test_restores_overlay_baseline() {
        let mut scheduler = scheduler();
        scheduler.set_target(Some(
            StyleTarget::new()
                .with_background("white")
                .with_overlay("rgba(0, 0, 0, 0.4)"),
        ));

        scheduler.begin();
        scheduler.apply(StyleOverrides::new().overlay("rgba(255, 0, 0, 0.8)"));
        fire_frame(&mut scheduler);
        assert_eq!(target(&scheduler).overlay.as_deref(), Some("rgba(255, 0, 0, 0.8)"));

        scheduler.end();
        assert_eq!(target(&scheduler).overlay.as_deref(), Some("rgba(0, 0, 0, 0.4)"));

        // A target that started without an overlay loses the previewed one.
        scheduler.set_target(Some(StyleTarget::new()));
        scheduler.host_mut().now = 100;
        scheduler.begin();
        scheduler.apply(StyleOverrides::new().overlay("rgba(0, 0, 255, 0.5)"));
        fire_frame(&mut scheduler);
        scheduler.end();
        assert_eq!(target(&scheduler).overlay, None);
    }

    #[test]
    fn test_end_cancels_pending_flush() {
        let mut scheduler = scheduler();

        scheduler.begin();
        scheduler.apply(StyleOverrides::new().background("red"));
        scheduler.end();

        assert!(scheduler.host().frames.is_empty());
        assert_eq!(scheduler.host().cancelled_frames.len(), 1);
        assert_eq!(scheduler.flush_count(), 0);
        assert_eq!(target(&scheduler).background.as_deref(), Some("white"));
    }

    #[test]
    fn test_nested_overrides_restore_on_last_end() {
        let mut scheduler = scheduler();

        scheduler.begin();
        scheduler.begin();
        scheduler.apply(StyleOverrides::new().background("red"));
        fire_frame(&mut scheduler);

        scheduler.end();
        assert_eq!(target(&scheduler).background.as_deref(), Some("red"));
        assert!(target(&scheduler).live);
        assert_eq!(scheduler.active_count(), 1);

        scheduler.end();
        assert_eq!(target(&scheduler).background.as_deref(), Some("white"));
        assert!(!scheduler.is_active());
    }

    #[test]
    fn test_rapid_applies_coalesce_into_one_flush() {
        let mut scheduler = scheduler();

        scheduler.begin();
        scheduler.apply(StyleOverrides::new().background("#111").var("--x", "1"));
        scheduler.apply(StyleOverrides::new().background("#222"));
        scheduler.apply(StyleOverrides::new().var("--x", "2").text("#eee"));

        assert_eq!(scheduler.host().frames.len(), 1);
        fire_frame(&mut scheduler);

        assert_eq!(scheduler.flush_count(), 1);
        assert!(!scheduler.has_pending());
        let t = target(&scheduler);
        assert_eq!(t.background.as_deref(), Some("#222"));
        assert_eq!(t.text_color.as_deref(), Some("#eee"));
        assert_eq!(t.vars.get("--x").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_second_flush_waits_for_interval() {
        let mut scheduler = scheduler();

        scheduler.begin();
        scheduler.apply(StyleOverrides::new().background("#111"));
        fire_frame(&mut scheduler);

        scheduler.host_mut().now = 10;
        scheduler.apply(StyleOverrides::new().background("#222"));
        assert!(scheduler.host().frames.is_empty());
        let (timer, delay) = scheduler.host_mut().take_timer().unwrap();
        assert_eq!(delay, 23);

        scheduler.host_mut().now = 33;
        scheduler.on_timer(timer);
        fire_frame(&mut scheduler);

        assert_eq!(scheduler.flush_count(), 2);
        assert_eq!(target(&scheduler).background.as_deref(), Some("#222"));
    }

    #[test]
    fn test_end_without_restore_keeps_preview() {
        let mut scheduler = scheduler();

        scheduler.begin();
        scheduler.apply(StyleOverrides::new().background("red").var("--y", "1"));
        fire_frame(&mut scheduler);
        scheduler.end_with(false);

        let t = target(&scheduler);
        assert_eq!(t.background.as_deref(), Some("red"));
        assert_eq!(t.vars.get("--y").map(String::as_str), Some("1"));
        assert!(!t.live);
    }

    #[test]
    fn test_swapping_target_mid_session() {
        let mut scheduler = scheduler();

        scheduler.begin();
        scheduler.apply(StyleOverrides::new().background("red"));
        fire_frame(&mut scheduler);

        let old = scheduler
            .set_target(Some(StyleTarget::new().with_background("navy")))
            .unwrap();
        assert!(!old.live);
        assert_eq!(old.background.as_deref(), Some("red"));
        assert!(target(&scheduler).live);

        scheduler.host_mut().now = 100;
        scheduler.apply(StyleOverrides::new().background("green"));
        fire_frame(&mut scheduler);
        assert_eq!(target(&scheduler).background.as_deref(), Some("green"));

        scheduler.end();
        assert_eq!(target(&scheduler).background.as_deref(), Some("navy"));
    }

    #[test]
    fn test_missing_target_is_a_no_op() {
        let mut scheduler = Scheduler::new(ManualHost::default(), &PreviewConfig::default());

        scheduler.begin();
        scheduler.apply(StyleOverrides::new().background("red"));
        assert!(scheduler.host().frames.is_empty());
        scheduler.end();
        assert!(!scheduler.is_active());
    }

    #[test]
    fn test_apply_outside_session_is_ignored() {
        let mut scheduler = scheduler();

        scheduler.apply(StyleOverrides::new().background("red"));
        assert!(scheduler.host().frames.is_empty());
        assert!(!scheduler.has_pending());

        scheduler.end();
        assert_eq!(scheduler.active_count(), 0);
    }
}
