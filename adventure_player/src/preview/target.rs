//! The live style target mutated during preview.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Identity of a live target, used to notice when the target is swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub Uuid);

impl TargetId {
    /// Create a new random target ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TargetId {
    fn default() -> Self {
        Self::new()
    }
}

/// A DOM-like element whose inline style can be read and written.
pub trait OverrideTarget {
    fn id(&self) -> TargetId;

    fn background(&self) -> Option<String>;
    fn text_color(&self) -> Option<String>;
    fn overlay(&self) -> Option<String>;

    fn set_background(&mut self, value: Option<&str>);
    fn set_text_color(&mut self, value: Option<&str>);
    fn set_overlay(&mut self, value: Option<&str>);

    fn set_var(&mut self, name: &str, value: &str);
    fn remove_var(&mut self, name: &str);

    /// Toggle the marker that tells styling the element is being scrubbed.
    fn set_live_marker(&mut self, live: bool);
}

/// In-memory style target for headless playback and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTarget {
    pub id: TargetId,
    pub background: Option<String>,
    pub text_color: Option<String>,
    pub overlay: Option<String>,
    pub vars: BTreeMap<String, String>,
    pub live: bool,
}

impl StyleTarget {
    /// Create a target with no inline styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting background.
    pub fn with_background(mut self, value: impl Into<String>) -> Self {
        self.background = Some(value.into());
        self
    }

    /// Set the starting text color.
    pub fn with_text_color(mut self, value: impl Into<String>) -> Self {
        self.text_color = Some(value.into());
        self
    }

    /// Set the starting overlay.
    pub fn with_overlay(mut self, value: impl Into<String>) -> Self {
        self.overlay = Some(value.into());
        self
    }
}

impl OverrideTarget for StyleTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn background(&self) -> Option<String> {
        self.background.clone()
    }

    fn text_color(&self) -> Option<String> {
        self.text_color.clone()
    }

    fn overlay(&self) -> Option<String> {
        self.overlay.clone()
    }

    fn set_background(&mut self, value: Option<&str>) {
        self.background = value.map(str::to_string);
    }

    fn set_text_color(&mut self, value: Option<&str>) {
        self.text_color = value.map(str::to_string);
    }

    fn set_overlay(&mut self, value: Option<&str>) {
        self.overlay = value.map(str::to_string);
    }

    fn set_var(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    fn remove_var(&mut self, name: &str) {
        self.vars.remove(name);
    }

    fn set_live_marker(&mut self, live: bool) {
        self.live = live;
    }
}
