//! Theme Resolver - turns adventure and node style props into concrete colors.
//!
//! Resolution steps:
//! 1. **Parse**: Props given as JSON text are decoded best effort
//! 2. **Merge**: Node keys override adventure keys of the same name
//! 3. **Contrast**: High contrast short-circuits to a fixed palette
//! 4. **Slots**: Each semantic slot reads its color and optional alpha key
//!
//! Slots without a usable color are left out so ambient styling shows through.

mod color;
mod fonts;

pub use color::*;
pub use fonts::*;

use adventure_graph::StyleProps;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::preview::StyleOverrides;

/// Explicit high contrast flag.
pub const HIGH_CONTRAST_KEY: &str = "high_contrast";

/// Toggle used by older adventures for the same purpose.
pub const LEGACY_HIGH_CONTRAST_KEY: &str = "settings_highcontrast";

/// Semantic color slots exposed as CSS variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThemeSlot {
    Background,
    Foreground,
    Text,
    Surface,
    Accent,
    Muted,
}

impl ThemeSlot {
    /// All slots in output order.
    pub const ALL: [ThemeSlot; 6] = [
        ThemeSlot::Background,
        ThemeSlot::Foreground,
        ThemeSlot::Text,
        ThemeSlot::Surface,
        ThemeSlot::Accent,
        ThemeSlot::Muted,
    ];

    fn name(self) -> &'static str {
        match self {
            ThemeSlot::Background => "background",
            ThemeSlot::Foreground => "foreground",
            ThemeSlot::Text => "text",
            ThemeSlot::Surface => "surface",
            ThemeSlot::Accent => "accent",
            ThemeSlot::Muted => "muted",
        }
    }

    /// CSS custom property written for this slot.
    pub fn css_var(self) -> String {
        format!("--adventure-{}", self.name())
    }

    /// Props key holding the slot's color.
    pub fn color_key(self) -> String {
        format!("{}_color", self.name())
    }

    /// Props key holding the slot's alpha, if the slot blends.
    pub fn alpha_key(self) -> Option<String> {
        match self {
            ThemeSlot::Background => None,
            _ => Some(format!("{}_alpha", self.name())),
        }
    }
}

/// Inline style convenience fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineStyle {
    pub background_color: Option<String>,
    pub color: Option<String>,
}

/// Resolved theme for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeOutput {
    /// CSS custom properties keyed by variable name.
    pub vars: BTreeMap<String, String>,
    pub style: InlineStyle,
    pub high_contrast: bool,
}

impl ThemeOutput {
    /// Value resolved for a slot.
    pub fn slot(&self, slot: ThemeSlot) -> Option<&str> {
        self.vars.get(&slot.css_var()).map(String::as_str)
    }

    /// Stage this theme as a live preview override.
    pub fn to_overrides(&self) -> StyleOverrides {
        StyleOverrides {
            vars: self.vars.clone(),
            background: self.style.background_color.clone(),
            text: self.style.color.clone(),
            overlay: None,
        }
    }

    fn set(&mut self, slot: ThemeSlot, value: String) {
        self.vars.insert(slot.css_var(), value);
    }

    fn high_contrast() -> Self {
        let mut out = ThemeOutput {
            high_contrast: true,
            ..Default::default()
        };
        out.set(ThemeSlot::Background, "#000000".into());
        out.set(ThemeSlot::Foreground, "#ffffff".into());
        out.set(ThemeSlot::Text, "#ffffff".into());
        out.set(ThemeSlot::Surface, "#000000".into());
        out.set(ThemeSlot::Accent, "#ffffff".into());
        out.set(ThemeSlot::Muted, "#ffffff".into());
        out.style = InlineStyle {
            background_color: Some("#000000".into()),
            color: Some("#ffffff".into()),
        };
        out
    }
}

/// Resolve a theme from already-parsed props.
pub fn resolve(
    adventure_props: &StyleProps,
    node_props: &StyleProps,
    force_high_contrast: bool,
) -> ThemeOutput {
    let props = adventure_props.merged_with(node_props);

    let high_contrast = force_high_contrast
        || props.is_truthy(HIGH_CONTRAST_KEY)
        || props.is_truthy(LEGACY_HIGH_CONTRAST_KEY);
    if high_contrast {
        return ThemeOutput::high_contrast();
    }

    let mut out = ThemeOutput::default();
    for slot in ThemeSlot::ALL {
        if let Some(value) = slot_value(&props, slot) {
            out.set(slot, value);
        }
    }

    out.style.background_color = out.slot(ThemeSlot::Background).map(str::to_string);
    out.style.color = out
        .slot(ThemeSlot::Text)
        .or_else(|| out.slot(ThemeSlot::Foreground))
        .map(str::to_string);
    out
}

/// Resolve a theme from raw props values (objects or JSON text).
pub fn resolve_raw(
    adventure_props: &Value,
    node_props: &Value,
    force_high_contrast: bool,
) -> ThemeOutput {
    resolve(
        &StyleProps::from_value(adventure_props),
        &StyleProps::from_value(node_props),
        force_high_contrast,
    )
}

fn slot_value(props: &StyleProps, slot: ThemeSlot) -> Option<String> {
    let color = props.get_str(&slot.color_key())?;
    match slot.alpha_key() {
        // Stored pre-composited, so assigned directly.
        None => Some(color.to_string()),
        Some(alpha_key) => {
            let alpha = props.get_f64(&alpha_key).unwrap_or(1.0);
            hex_to_rgba(color, alpha)
        }
    }
}
